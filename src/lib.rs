pub mod analyzer;
pub mod builder;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod extractor;
pub mod graph;
pub mod loader;
pub mod reporter;

pub use analyzer::GraphAnalyzer;
pub use builder::{BuildOptions, GraphBuilder, Weighting};
pub use config::Config;
pub use discovery::TemplateDiscovery;
pub use document::DocumentValue;
pub use error::GraphError;
pub use extractor::{DependencyExtractor, DependencyMap};
pub use graph::ResourceGraph;
pub use loader::TemplateLoader;
pub use reporter::Reporter;

pub type Result<T> = anyhow::Result<T>;
