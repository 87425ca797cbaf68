use thiserror::Error;

/// Failures surfaced by graph construction and analysis.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// The document cannot be reduced to a "Resources" mapping. Fatal to a
    /// build; nothing is populated when this is returned.
    #[error("document has no \"Resources\" mapping")]
    Structure,

    /// A query named a node the graph does not contain.
    #[error("node \"{0}\" not found in graph")]
    NotFound(String),

    /// No path exists between the requested endpoints.
    #[error("no path from \"{from}\" to \"{to}\"")]
    NotReachable { from: String, to: String },

    /// Max-flow was requested before any edge capacity was assigned.
    #[error("no edge capacities assigned; set capacities before computing flow")]
    MissingCapacity,

    /// The template was recognized but is not a format we process.
    #[error("unsupported template format: {0}")]
    UnsupportedFormat(String),
}
