use crate::error::GraphError;
use serde::Serialize;
use std::collections::HashMap;

/// One dependency edge, by node id. Weight and capacity stay unset until a
/// weighting or capacity pass assigns them.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EdgeData {
    pub from: usize,
    pub to: usize,
    pub weight: Option<f64>,
    pub capacity: Option<f64>,
}

/// Read-only edge view with endpoint names resolved, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
    pub weight: Option<f64>,
    pub capacity: Option<f64>,
}

/// Owned adjacency-list graph over resource names. Directionality is fixed
/// at construction. Nodes keep insertion order, edges keep discovery order.
#[derive(Debug, Clone)]
pub struct ResourceGraph {
    directed: bool,
    pub(crate) nodes: Vec<String>,
    pub(crate) node_ids: HashMap<String, usize>,
    pub(crate) edges: Vec<EdgeData>,
    /// Edge ids leaving each node. Undirected graphs list an edge under
    /// both endpoints.
    pub(crate) outgoing: Vec<Vec<usize>>,
    edge_ids: HashMap<(usize, usize), usize>,
}

impl ResourceGraph {
    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            node_ids: HashMap::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            edge_ids: HashMap::new(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_ids.contains_key(name)
    }

    /// Inserts a node, returning its id. Re-inserting an existing name is a
    /// no-op that returns the original id.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&id) = self.node_ids.get(name) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(name.to_string());
        self.node_ids.insert(name.to_string(), id);
        self.outgoing.push(Vec::new());
        id
    }

    pub fn add_nodes<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_node(name.as_ref());
        }
    }

    /// Inserts or updates an edge. Missing endpoints are created first.
    /// Repeating the same ordered pair updates attributes in place; a None
    /// attribute leaves the stored value untouched, Some overwrites it.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: Option<f64>, capacity: Option<f64>) {
        let from_id = self.add_node(from);
        let to_id = self.add_node(to);

        if let Some(&edge_id) = self.edge_ids.get(&(from_id, to_id)) {
            let edge = &mut self.edges[edge_id];
            if weight.is_some() {
                edge.weight = weight;
            }
            if capacity.is_some() {
                edge.capacity = capacity;
            }
            return;
        }

        let edge_id = self.edges.len();
        self.edges.push(EdgeData {
            from: from_id,
            to: to_id,
            weight,
            capacity,
        });
        self.outgoing[from_id].push(edge_id);
        self.edge_ids.insert((from_id, to_id), edge_id);

        if !self.directed && from_id != to_id {
            self.outgoing[to_id].push(edge_id);
            self.edge_ids.insert((to_id, from_id), edge_id);
        }
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Edges in discovery order, with endpoint names resolved.
    pub fn edges(&self) -> Vec<EdgeView> {
        self.edges
            .iter()
            .map(|e| EdgeView {
                from: self.nodes[e.from].clone(),
                to: self.nodes[e.to].clone(),
                weight: e.weight,
                capacity: e.capacity,
            })
            .collect()
    }

    pub(crate) fn node_id(&self, name: &str) -> Option<usize> {
        self.node_ids.get(name).copied()
    }

    pub fn set_edge_weight(&mut self, from: &str, to: &str, weight: f64) -> Result<(), GraphError> {
        let id = self
            .lookup_edge(from, to)
            .ok_or_else(|| GraphError::NotFound(format!("{} -> {}", from, to)))?;
        self.edges[id].weight = Some(weight);
        Ok(())
    }

    pub fn set_edge_capacity(
        &mut self,
        from: &str,
        to: &str,
        capacity: f64,
    ) -> Result<(), GraphError> {
        let id = self
            .lookup_edge(from, to)
            .ok_or_else(|| GraphError::NotFound(format!("{} -> {}", from, to)))?;
        self.edges[id].capacity = Some(capacity);
        Ok(())
    }

    fn lookup_edge(&self, from: &str, to: &str) -> Option<usize> {
        let from_id = self.node_id(from)?;
        let to_id = self.node_id(to)?;
        self.edge_ids.get(&(from_id, to_id)).copied()
    }

    /// Assigns a weight to every edge, in discovery order.
    pub fn assign_weights<F>(&mut self, mut next: F)
    where
        F: FnMut() -> f64,
    {
        for edge in &mut self.edges {
            edge.weight = Some(next());
        }
    }

    /// Assigns a capacity to every edge, in discovery order.
    pub fn assign_capacities<F>(&mut self, mut next: F)
    where
        F: FnMut() -> f64,
    {
        for edge in &mut self.edges {
            edge.capacity = Some(next());
        }
    }

    pub fn has_capacities(&self) -> bool {
        self.edges.iter().any(|e| e.capacity.is_some())
    }

    pub fn has_weights(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(|e| e.weight.is_some())
    }

    /// New independent graph holding `origin`, every node reachable from it
    /// over one outgoing edge, and all parent edges between those nodes.
    /// Mutating the copy never touches this graph.
    pub fn subgraph(&self, origin: &str) -> Result<ResourceGraph, GraphError> {
        let origin_id = self
            .node_id(origin)
            .ok_or_else(|| GraphError::NotFound(origin.to_string()))?;

        let mut members = vec![origin_id];
        for &edge_id in &self.outgoing[origin_id] {
            let edge = &self.edges[edge_id];
            let other = if edge.from == origin_id { edge.to } else { edge.from };
            if !members.contains(&other) {
                members.push(other);
            }
        }

        let mut sub = ResourceGraph::new(self.directed);
        for &id in &members {
            sub.add_node(&self.nodes[id]);
        }
        for edge in &self.edges {
            if members.contains(&edge.from) && members.contains(&edge.to) {
                sub.add_edge(
                    &self.nodes[edge.from],
                    &self.nodes[edge.to],
                    edge.weight,
                    edge.capacity,
                );
            }
        }

        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_is_idempotent() {
        let mut graph = ResourceGraph::directed();
        let first = graph.add_node("X");
        let second = graph.add_node("X");
        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn add_nodes_preserves_order_and_collapses_duplicates() {
        let mut graph = ResourceGraph::directed();
        graph.add_nodes(["B", "A", "B", "C"]);
        assert_eq!(graph.nodes(), &["B", "A", "C"]);
    }

    #[test]
    fn add_edge_vivifies_missing_endpoints() {
        let mut graph = ResourceGraph::directed();
        graph.add_edge("A", "B", None, None);
        assert_eq!(graph.nodes(), &["A", "B"]);
        assert_eq!(graph.edge_count(), 1);
        let edges = graph.edges();
        assert_eq!(edges[0].from, "A");
        assert_eq!(edges[0].to, "B");
    }

    #[test]
    fn repeated_edge_updates_attributes_without_duplicating() {
        let mut graph = ResourceGraph::directed();
        graph.add_edge("A", "B", Some(1.0), None);
        graph.add_edge("A", "B", Some(7.0), Some(3.0));
        assert_eq!(graph.edge_count(), 1);
        let edges = graph.edges();
        assert_eq!(edges[0].weight, Some(7.0));
        assert_eq!(edges[0].capacity, Some(3.0));
    }

    #[test]
    fn none_attribute_leaves_previous_value() {
        let mut graph = ResourceGraph::directed();
        graph.add_edge("A", "B", Some(4.0), Some(2.0));
        graph.add_edge("A", "B", None, None);
        let edges = graph.edges();
        assert_eq!(edges[0].weight, Some(4.0));
        assert_eq!(edges[0].capacity, Some(2.0));
    }

    #[test]
    fn self_loop_is_permitted() {
        let mut graph = ResourceGraph::directed();
        graph.add_edge("A", "A", None, None);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut graph = ResourceGraph::directed();
        graph.add_edge("A", "B", None, None);
        let a = graph.node_id("A").unwrap();
        let b = graph.node_id("B").unwrap();
        assert_eq!(graph.outgoing[a].len(), 1);
        assert!(graph.outgoing[b].is_empty());
    }

    #[test]
    fn undirected_edges_list_under_both_endpoints() {
        let mut graph = ResourceGraph::undirected();
        graph.add_edge("A", "B", None, None);
        let a = graph.node_id("A").unwrap();
        let b = graph.node_id("B").unwrap();
        assert_eq!(graph.outgoing[a].len(), 1);
        assert_eq!(graph.outgoing[b].len(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn assign_weights_covers_every_edge() {
        let mut graph = ResourceGraph::directed();
        graph.add_edge("A", "B", None, None);
        graph.add_edge("B", "C", None, None);
        graph.assign_weights(|| 3.0);
        assert!(graph.edges().iter().all(|e| e.weight == Some(3.0)));
        assert!(graph.has_weights());
    }

    #[test]
    fn subgraph_contains_origin_neighbors_and_their_edges() {
        let mut graph = ResourceGraph::directed();
        graph.add_edge("A", "B", Some(1.0), None);
        graph.add_edge("A", "C", Some(2.0), None);
        graph.add_edge("B", "C", Some(3.0), None);
        graph.add_edge("C", "D", Some(4.0), None);

        let sub = graph.subgraph("A").unwrap();
        assert_eq!(sub.nodes(), &["A", "B", "C"]);
        // D is two hops out, so C -> D is excluded; B -> C is between members.
        assert_eq!(sub.edge_count(), 3);
        assert!(sub.edges().iter().any(|e| e.from == "B" && e.to == "C"));
    }

    #[test]
    fn subgraph_is_an_independent_copy() {
        let mut graph = ResourceGraph::directed();
        graph.add_edge("A", "B", None, None);
        let mut sub = graph.subgraph("A").unwrap();
        sub.add_edge("B", "Z", None, None);
        sub.set_edge_weight("A", "B", 99.0).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains_node("Z"));
        assert_eq!(graph.edges()[0].weight, None);
    }

    #[test]
    fn subgraph_of_missing_node_fails() {
        let graph = ResourceGraph::directed();
        let err = graph.subgraph("Ghost").unwrap_err();
        assert_eq!(err, GraphError::NotFound("Ghost".to_string()));
    }
}
