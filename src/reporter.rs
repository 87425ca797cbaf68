use crate::graph::{EdgeView, ResourceGraph};
use anyhow::Context;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Node and edge data in render-ready form. This is the one-way boundary
/// toward external renderers; nothing here draws anything.
#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub metadata: ReportMetadata,
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeView>,
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub template: String,
    pub directed: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub avg_out_degree: f64,
    pub weighted: bool,
}

impl GraphSummary {
    pub fn of(graph: &ResourceGraph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();
        Self {
            node_count,
            edge_count,
            avg_out_degree: if node_count > 0 {
                edge_count as f64 / node_count as f64
            } else {
                0.0
            },
            weighted: graph.has_weights(),
        }
    }

    pub fn print_summary(&self) {
        println!("Dependency Graph Summary:");
        println!("  Nodes: {}", self.node_count);
        println!("  Edges: {}", self.edge_count);
        println!("  Average out-degree: {:.2}", self.avg_out_degree);
        println!("  Weighted: {}", if self.weighted { "yes" } else { "no" });
    }
}

pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_report(&self, graph: &ResourceGraph, template: &str) -> GraphReport {
        GraphReport {
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now().to_rfc3339(),
                template: template.to_string(),
                directed: graph.is_directed(),
                node_count: graph.node_count(),
                edge_count: graph.edge_count(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            nodes: graph.nodes().to_vec(),
            edges: graph.edges(),
        }
    }

    /// Writes the JSON report and a Graphviz DOT rendition, returning the
    /// paths written.
    pub fn export_report(&self, report: &GraphReport, output_dir: &Path) -> crate::Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("could not create {}", output_dir.display()))?;

        let json_path = output_dir.join("graph.json");
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&json_path, json)?;

        let dot_path = output_dir.join("graph.dot");
        fs::write(&dot_path, self.generate_dot(report))?;

        Ok(vec![json_path, dot_path])
    }

    pub fn generate_dot(&self, report: &GraphReport) -> String {
        let (keyword, arrow) = if report.metadata.directed {
            ("digraph", "->")
        } else {
            ("graph", "--")
        };

        let mut dot = format!("{} resources {{\n", keyword);
        for node in &report.nodes {
            let _ = writeln!(dot, "    \"{}\";", escape(node));
        }
        for edge in &report.edges {
            let mut labels = Vec::new();
            if let Some(weight) = edge.weight {
                labels.push(format!("weight={}", weight));
            }
            if let Some(capacity) = edge.capacity {
                labels.push(format!("capacity={}", capacity));
            }
            let attrs = if labels.is_empty() {
                String::new()
            } else {
                format!(" [label=\"{}\"]", labels.join(", "))
            };
            let _ = writeln!(
                dot,
                "    \"{}\" {} \"{}\"{};",
                escape(&edge.from),
                arrow,
                escape(&edge.to),
                attrs
            );
        }
        dot.push_str("}\n");
        dot
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(name: &str) -> String {
    name.replace('"', "\\\"")
}
