use crate::{
    document::DocumentValue,
    error::GraphError,
    extractor::DependencyExtractor,
    graph::ResourceGraph,
};
use rand::Rng;

/// Default inclusive range for randomly drawn edge weights.
pub const DEFAULT_WEIGHT_RANGE: (u32, u32) = (1, 25);

/// How a post-pass assigns a value to every edge in the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weighting {
    /// Leave edges unannotated.
    Unset,
    /// One caller-supplied constant, applied uniformly.
    Uniform(f64),
    /// An independent random integer per edge, drawn from [min, max].
    Random { min: u32, max: u32 },
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting::Unset
    }
}

impl Weighting {
    pub fn random_default() -> Self {
        let (min, max) = DEFAULT_WEIGHT_RANGE;
        Weighting::Random { min, max }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildOptions {
    pub weights: Weighting,
    pub capacities: Weighting,
}

/// Turns a parsed template into a populated ResourceGraph: resource names
/// become nodes, extracted references become edges, then the optional
/// weight/capacity passes run over the full edge set.
pub struct GraphBuilder {
    extractor: DependencyExtractor,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            extractor: DependencyExtractor::new(),
        }
    }

    pub fn build(
        &self,
        document: &DocumentValue,
        options: BuildOptions,
    ) -> Result<ResourceGraph, GraphError> {
        let resources = document.get("Resources").ok_or(GraphError::Structure)?;
        let declared = resources.as_object().ok_or(GraphError::Structure)?;

        let mut graph = ResourceGraph::directed();

        // Declared resources first, in document order; extracted references
        // may then vivify names the template never declares.
        graph.add_nodes(declared.iter().map(|(name, _)| name.as_str()));

        let dependencies = self.extractor.extract(resources);
        for (resource, referenced) in dependencies.entries() {
            for target in referenced {
                graph.add_edge(resource, target, None, None);
            }
        }

        apply(&mut graph, options.weights, |g, next| g.assign_weights(next));
        apply(&mut graph, options.capacities, |g, next| {
            g.assign_capacities(next)
        });

        Ok(graph)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn apply<F>(graph: &mut ResourceGraph, weighting: Weighting, assign: F)
where
    F: Fn(&mut ResourceGraph, &mut dyn FnMut() -> f64),
{
    match weighting {
        Weighting::Unset => {}
        Weighting::Uniform(value) => assign(graph, &mut || value),
        Weighting::Random { min, max } => {
            let mut rng = rand::thread_rng();
            assign(graph, &mut || f64::from(rng.gen_range(min..=max)));
        }
    }
}
