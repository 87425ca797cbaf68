use clap::{Parser, Subcommand};
use iac_grapher::{
    builder::{BuildOptions, Weighting},
    reporter::GraphSummary,
    Config, GraphAnalyzer, GraphBuilder, Reporter, ResourceGraph, TemplateDiscovery,
    TemplateLoader,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iac-grapher")]
#[command(about = "Builds and analyzes dependency graphs from infrastructure templates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dependency graph of a template and export it
    Graph {
        /// Template file (JSON or YAML)
        template: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for the report and DOT export
        #[arg(short, long, default_value = "./graph-output")]
        output: PathBuf,

        /// Assign this weight to every edge
        #[arg(long, conflicts_with = "random_weights")]
        weight: Option<f64>,

        /// Assign an independent random integer weight per edge
        #[arg(long)]
        random_weights: bool,
    },
    /// Enumerate every simple path between two resources
    Paths {
        template: PathBuf,
        from: String,
        to: String,
    },
    /// Shortest path (fewest edges) between two resources
    ShortestPath {
        template: PathBuf,
        from: String,
        to: String,
    },
    /// Maximum flow between two resources over edge capacities
    MaxFlow {
        template: PathBuf,
        source: String,
        sink: String,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Assign this capacity to every edge before solving
        #[arg(long, conflicts_with = "random_capacities")]
        capacity: Option<f64>,

        /// Assign an independent random integer capacity per edge
        #[arg(long)]
        random_capacities: bool,

        /// Also print the residual graph left by the computation
        #[arg(long)]
        residual: bool,
    },
    /// Extract the one-hop neighborhood of a resource as a new graph
    Subgraph {
        template: PathBuf,
        origin: String,

        /// Output directory for the sub-graph export
        #[arg(short, long, default_value = "./graph-output")]
        output: PathBuf,
    },
    /// List template files under a directory
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the config file (defaults to ~/.iac-grapher.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Graph {
            template,
            config,
            output,
            weight,
            random_weights,
        } => {
            let config = load_config(config)?;
            let weights = weighting_from(weight, random_weights, &config);
            let graph = build_graph(&template, weights, Weighting::Unset)?;

            GraphSummary::of(&graph).print_summary();

            println!("\n📊 Exporting graph...");
            let reporter = Reporter::new();
            let report = reporter.generate_report(&graph, &template.display().to_string());
            let written = reporter.export_report(&report, &output)?;
            println!("✅ Graph exported to:");
            for path in written {
                println!("   - {}", path.display());
            }
        }
        Commands::Paths { template, from, to } => {
            let graph = build_graph(&template, Weighting::Unset, Weighting::Unset)?;
            let analyzer = GraphAnalyzer::new(&graph);
            let mut count = 0;
            for path in analyzer.all_simple_paths(&from, &to) {
                println!("{}", path.join(" -> "));
                count += 1;
            }
            if count == 0 {
                println!("No path from {} to {}", from, to);
            } else {
                println!("\n{} path(s) found", count);
            }
        }
        Commands::ShortestPath { template, from, to } => {
            let graph = build_graph(&template, Weighting::Unset, Weighting::Unset)?;
            let analyzer = GraphAnalyzer::new(&graph);
            let path = analyzer.shortest_path(&from, &to)?;
            println!("{}", path.join(" -> "));
            println!("{} edge(s)", path.len().saturating_sub(1));
        }
        Commands::MaxFlow {
            template,
            source,
            sink,
            config,
            capacity,
            random_capacities,
            residual,
        } => {
            let config = load_config(config)?;
            let capacities = weighting_from(capacity, random_capacities, &config);
            let graph = build_graph(&template, Weighting::Unset, capacities)?;
            let analyzer = GraphAnalyzer::new(&graph);

            let result = analyzer.maximum_flow(&source, &sink)?;
            println!("Maximum flow {} -> {}: {}", source, sink, result.value);
            for flow in &result.flows {
                println!("  {} -> {}: {}", flow.from, flow.to, flow.flow);
            }

            if residual {
                println!("\nResidual graph:");
                let residual_graph = analyzer.shortest_augmenting_path(&source, &sink)?;
                for edge in residual_graph.edges() {
                    println!(
                        "  {} -> {}: {}",
                        edge.from,
                        edge.to,
                        edge.capacity.unwrap_or(0.0)
                    );
                }
            }
        }
        Commands::Subgraph {
            template,
            origin,
            output,
        } => {
            let graph = build_graph(&template, Weighting::Unset, Weighting::Unset)?;
            let sub = graph.subgraph(&origin)?;

            GraphSummary::of(&sub).print_summary();

            let reporter = Reporter::new();
            let report = reporter.generate_report(&sub, &template.display().to_string());
            let written = reporter.export_report(&report, &output)?;
            println!("✅ Sub-graph exported to:");
            for path in written {
                println!("   - {}", path.display());
            }
        }
        Commands::Scan { path, config } => {
            let config = load_config(config)?;
            println!("🔍 Scanning {} for templates...", path.display());
            let discovery = TemplateDiscovery::new(config);
            let templates = discovery.discover_templates(&path)?;
            for template in &templates {
                let marker = if template.supported { "✓" } else { "✗" };
                println!("  {} {} ({})", marker, template.path.display(), template.format);
            }
            println!();
            discovery.get_stats(&templates).print_summary();
        }
        Commands::Config { output } => {
            let config_path = output.unwrap_or_else(|| {
                Config::default_config_path().unwrap_or_else(|_| PathBuf::from("iac-grapher.toml"))
            });

            println!("📝 Generating configuration file: {}", config_path.display());
            std::fs::write(&config_path, Config::create_documented_config())?;
            println!("✅ Configuration file created successfully!");
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(&path),
        None => Config::load(),
    }
}

fn weighting_from(explicit: Option<f64>, random: bool, config: &Config) -> Weighting {
    if let Some(value) = explicit {
        return Weighting::Uniform(value);
    }
    if random || config.weighting.random_weights {
        return Weighting::Random {
            min: config.weighting.random_min,
            max: config.weighting.random_max,
        };
    }
    match config.weighting.default_weight {
        Some(value) => Weighting::Uniform(value),
        None => Weighting::Unset,
    }
}


fn build_graph(
    template: &PathBuf,
    weights: Weighting,
    capacities: Weighting,
) -> anyhow::Result<ResourceGraph> {
    println!("🔍 Loading template: {}", template.display());
    let document = TemplateLoader::new().load(template)?;

    println!("🕸️  Building dependency graph...");
    let options = BuildOptions {
        weights,
        capacities,
    };
    let graph = GraphBuilder::new().build(&document, options)?;
    Ok(graph)
}
