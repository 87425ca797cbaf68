use crate::error::GraphError;
use crate::graph::ResourceGraph;
use serde::Serialize;
use std::collections::VecDeque;

/// Result of a maximum-flow computation: the total feasible flow and the
/// flow assigned to each edge, in edge discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowResult {
    pub value: f64,
    pub flows: Vec<EdgeFlow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeFlow {
    pub from: String,
    pub to: String,
    pub flow: f64,
}

/// Read-only algorithms over a ResourceGraph snapshot. No state survives
/// between calls; every query walks the graph fresh.
pub struct GraphAnalyzer<'a> {
    graph: &'a ResourceGraph,
}

impl<'a> GraphAnalyzer<'a> {
    pub fn new(graph: &'a ResourceGraph) -> Self {
        Self { graph }
    }

    /// Lazy enumeration of every simple path from `source` to `target`, in
    /// depth-first order over the adjacency lists. Re-invoking starts a
    /// fresh enumeration. Unknown endpoints yield an empty sequence.
    pub fn all_simple_paths(&self, source: &str, target: &str) -> SimplePaths<'a> {
        SimplePaths::new(self.graph, source, target)
    }

    /// The path with the fewest edges among all simple paths, breaking ties
    /// in favor of the first one the enumeration produces.
    pub fn shortest_path(&self, source: &str, target: &str) -> Result<Vec<String>, GraphError> {
        let mut best: Option<Vec<String>> = None;
        for path in self.all_simple_paths(source, target) {
            let better = match &best {
                Some(current) => path.len() < current.len(),
                None => true,
            };
            if better {
                best = Some(path);
            }
        }
        best.ok_or_else(|| GraphError::NotReachable {
            from: source.to_string(),
            to: target.to_string(),
        })
    }

    /// Maximum feasible flow from `source` to `sink`, with edge `capacity`
    /// as the per-edge bound. Edges without a capacity carry zero. Fails if
    /// no capacity was ever assigned; a disconnected pair yields zero flow.
    pub fn maximum_flow(&self, source: &str, sink: &str) -> Result<FlowResult, GraphError> {
        let flows = self.run_augmenting_flow(source, sink)?;
        let value = self.flow_out_of(source, &flows);

        let per_edge = self
            .graph
            .edges
            .iter()
            .zip(&flows)
            .map(|(edge, &flow)| EdgeFlow {
                from: self.graph.nodes[edge.from].clone(),
                to: self.graph.nodes[edge.to].clone(),
                flow,
            })
            .collect();

        Ok(FlowResult {
            value,
            flows: per_edge,
        })
    }

    /// Residual-capacity graph left by one full run of the shortest
    /// augmenting path algorithm. Exposed for inspecting the flow
    /// computation; `maximum_flow` is the primary query.
    pub fn shortest_augmenting_path(
        &self,
        source: &str,
        sink: &str,
    ) -> Result<ResourceGraph, GraphError> {
        let flows = self.run_augmenting_flow(source, sink)?;

        // Residual contributions per ordered pair: unused forward capacity,
        // plus a reverse arc for flow that could be pushed back. Antiparallel
        // contributions to the same pair accumulate.
        let mut residuals: Vec<((usize, usize), f64)> = Vec::new();
        let mut accumulate = |pair: (usize, usize), amount: f64| {
            if amount <= 0.0 {
                return;
            }
            match residuals.iter_mut().find(|(p, _)| *p == pair) {
                Some((_, total)) => *total += amount,
                None => residuals.push((pair, amount)),
            }
        };

        for (edge, &flow) in self.graph.edges.iter().zip(&flows) {
            let capacity = edge.capacity.unwrap_or(0.0);
            accumulate((edge.from, edge.to), capacity - flow);
            accumulate((edge.to, edge.from), flow);
        }

        let mut residual = ResourceGraph::directed();
        residual.add_nodes(self.graph.nodes());
        for ((from, to), amount) in residuals {
            residual.add_edge(
                &self.graph.nodes[from],
                &self.graph.nodes[to],
                None,
                Some(amount),
            );
        }

        Ok(residual)
    }

    /// Edmonds-Karp: repeatedly push flow along the shortest augmenting
    /// path in the residual graph. Returns per-edge flow by edge id.
    fn run_augmenting_flow(&self, source: &str, sink: &str) -> Result<Vec<f64>, GraphError> {
        if !self.graph.has_capacities() {
            return Err(GraphError::MissingCapacity);
        }

        let mut flows = vec![0.0_f64; self.graph.edges.len()];

        let (Some(source_id), Some(sink_id)) =
            (self.graph.node_id(source), self.graph.node_id(sink))
        else {
            return Ok(flows);
        };
        if source_id == sink_id {
            return Ok(flows);
        }

        // Incoming edge ids per node, for residual back-traversal.
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); self.graph.nodes.len()];
        for (edge_id, edge) in self.graph.edges.iter().enumerate() {
            incoming[edge.to].push(edge_id);
        }

        loop {
            // BFS for the shortest augmenting path. parent[n] records the
            // edge used to reach n and whether it was traversed forward.
            let mut parent: Vec<Option<(usize, bool)>> = vec![None; self.graph.nodes.len()];
            let mut visited = vec![false; self.graph.nodes.len()];
            visited[source_id] = true;

            let mut queue = VecDeque::from([source_id]);
            'bfs: while let Some(node) = queue.pop_front() {
                for &edge_id in &self.graph.outgoing[node] {
                    let edge = &self.graph.edges[edge_id];
                    if edge.from != node {
                        continue;
                    }
                    let residual = edge.capacity.unwrap_or(0.0) - flows[edge_id];
                    if residual > 0.0 && !visited[edge.to] {
                        visited[edge.to] = true;
                        parent[edge.to] = Some((edge_id, true));
                        if edge.to == sink_id {
                            break 'bfs;
                        }
                        queue.push_back(edge.to);
                    }
                }
                for &edge_id in &incoming[node] {
                    let edge = &self.graph.edges[edge_id];
                    if flows[edge_id] > 0.0 && !visited[edge.from] {
                        visited[edge.from] = true;
                        parent[edge.from] = Some((edge_id, false));
                        if edge.from == sink_id {
                            break 'bfs;
                        }
                        queue.push_back(edge.from);
                    }
                }
            }

            if !visited[sink_id] {
                break;
            }

            // Bottleneck along the found path, then augment.
            let mut bottleneck = f64::INFINITY;
            let mut node = sink_id;
            while node != source_id {
                let Some((edge_id, forward)) = parent[node] else {
                    break;
                };
                let edge = &self.graph.edges[edge_id];
                let residual = if forward {
                    edge.capacity.unwrap_or(0.0) - flows[edge_id]
                } else {
                    flows[edge_id]
                };
                bottleneck = bottleneck.min(residual);
                node = if forward { edge.from } else { edge.to };
            }

            let mut node = sink_id;
            while node != source_id {
                let Some((edge_id, forward)) = parent[node] else {
                    break;
                };
                let edge = &self.graph.edges[edge_id];
                if forward {
                    flows[edge_id] += bottleneck;
                    node = edge.from;
                } else {
                    flows[edge_id] -= bottleneck;
                    node = edge.to;
                }
            }
        }

        Ok(flows)
    }

    /// Net flow leaving `source`: outgoing minus incoming assignments.
    fn flow_out_of(&self, source: &str, flows: &[f64]) -> f64 {
        let Some(source_id) = self.graph.node_id(source) else {
            return 0.0;
        };
        self.graph
            .edges
            .iter()
            .zip(flows)
            .map(|(edge, &flow)| {
                if edge.from == source_id {
                    flow
                } else if edge.to == source_id {
                    -flow
                } else {
                    0.0
                }
            })
            .sum()
    }
}

/// Depth-first simple-path enumeration, produced lazily. Each `next` call
/// resumes the traversal where the previous path ended.
pub struct SimplePaths<'a> {
    graph: &'a ResourceGraph,
    target: usize,
    /// (node, position in its outgoing list); parallels `path`.
    stack: Vec<(usize, usize)>,
    path: Vec<usize>,
    on_path: Vec<bool>,
    trivial: bool,
    exhausted: bool,
}

impl<'a> SimplePaths<'a> {
    fn new(graph: &'a ResourceGraph, source: &str, target: &str) -> Self {
        let endpoints = graph
            .node_id(source)
            .and_then(|s| graph.node_id(target).map(|t| (s, t)));

        match endpoints {
            Some((source_id, target_id)) => {
                let trivial = source_id == target_id;
                let mut on_path = vec![false; graph.nodes.len()];
                on_path[source_id] = true;
                Self {
                    graph,
                    target: target_id,
                    stack: if trivial { Vec::new() } else { vec![(source_id, 0)] },
                    path: if trivial { Vec::new() } else { vec![source_id] },
                    on_path,
                    trivial,
                    exhausted: false,
                }
            }
            None => Self {
                graph,
                target: 0,
                stack: Vec::new(),
                path: Vec::new(),
                on_path: Vec::new(),
                trivial: false,
                exhausted: true,
            },
        }
    }

    fn named_path(&self, tail: usize) -> Vec<String> {
        self.path
            .iter()
            .chain(std::iter::once(&tail))
            .map(|&id| self.graph.nodes[id].clone())
            .collect()
    }
}

impl<'a> Iterator for SimplePaths<'a> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.trivial {
            self.exhausted = true;
            return Some(vec![self.graph.nodes[self.target].clone()]);
        }

        while let Some((node, pos)) = self.stack.last().copied() {
            let out = &self.graph.outgoing[node];
            if pos >= out.len() {
                self.stack.pop();
                self.path.pop();
                self.on_path[node] = false;
                continue;
            }
            if let Some(last) = self.stack.last_mut() {
                last.1 += 1;
            }

            let edge = &self.graph.edges[out[pos]];
            let neighbor = if edge.from == node { edge.to } else { edge.from };
            if self.on_path[neighbor] {
                continue;
            }
            if neighbor == self.target {
                return Some(self.named_path(neighbor));
            }
            self.stack.push((neighbor, 0));
            self.path.push(neighbor);
            self.on_path[neighbor] = true;
        }

        self.exhausted = true;
        None
    }
}
