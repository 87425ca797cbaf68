use iac_grapher::{
    builder::{BuildOptions, Weighting},
    GraphAnalyzer, GraphBuilder, TemplateLoader,
};
use std::io::Write;

fn build(json: &str, options: BuildOptions) -> iac_grapher::ResourceGraph {
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    let document = iac_grapher::DocumentValue::from(value);
    GraphBuilder::new().build(&document, options).unwrap()
}

#[test]
fn minimal_template_yields_one_edge() {
    let graph = build(
        r#"{"Resources": {"Bucket": {}, "Instance": {"DependsOn": "Bucket"}}}"#,
        BuildOptions::default(),
    );

    assert_eq!(graph.nodes(), &["Bucket", "Instance"]);
    let edges = graph.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].from, "Instance");
    assert_eq!(edges[0].to, "Bucket");
}

#[test]
fn loaded_template_supports_path_queries() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{
            "Resources": {{
                "Vpc": {{}},
                "Subnet": {{"Ref": "Vpc"}},
                "Instance": {{
                    "Properties": {{"SubnetId": {{"Ref": "Subnet"}}}},
                    "DependsOn": "Vpc"
                }},
                "Bucket": {{}}
            }}
        }}"#
    )
    .unwrap();

    let document = TemplateLoader::new().load(file.path()).unwrap();
    let graph = GraphBuilder::new()
        .build(&document, BuildOptions::default())
        .unwrap();

    // Instance contains a nested Ref, so its DependsOn branch never runs.
    let edges = graph.edges();
    assert!(edges.iter().any(|e| e.from == "Instance" && e.to == "Subnet"));
    assert!(!edges.iter().any(|e| e.from == "Instance" && e.to == "Vpc"));

    let analyzer = GraphAnalyzer::new(&graph);
    let path = analyzer.shortest_path("Instance", "Vpc").unwrap();
    assert_eq!(path, vec!["Instance", "Subnet", "Vpc"]);

    let paths: Vec<_> = analyzer.all_simple_paths("Bucket", "Vpc").collect();
    assert!(paths.is_empty());
}

#[test]
fn yaml_and_json_templates_build_the_same_graph() {
    let json_graph = build(
        r#"{"Resources": {"Db": {}, "App": {"DependsOn": ["Db"]}}}"#,
        BuildOptions::default(),
    );

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "Resources:\n  Db: {{}}\n  App:\n    DependsOn:\n      - Db\n"
    )
    .unwrap();
    let document = TemplateLoader::new().load(file.path()).unwrap();
    let yaml_graph = GraphBuilder::new()
        .build(&document, BuildOptions::default())
        .unwrap();

    assert_eq!(json_graph.nodes(), yaml_graph.nodes());
    assert_eq!(json_graph.edges(), yaml_graph.edges());
}

#[test]
fn capacitated_build_supports_flow_queries() {
    let graph = build(
        r#"{"Resources": {
            "Sink": {},
            "Relay": {"DependsOn": "Sink"},
            "Source": {"DependsOn": ["Relay", "Sink"]}
        }}"#,
        BuildOptions {
            weights: Weighting::Unset,
            capacities: Weighting::Uniform(2.0),
        },
    );

    let analyzer = GraphAnalyzer::new(&graph);
    let result = analyzer.maximum_flow("Source", "Sink").unwrap();
    // Two edge-disjoint routes at capacity 2 each.
    assert_eq!(result.value, 4.0);
}

#[test]
fn weighted_build_annotates_the_export() {
    let graph = build(
        r#"{"Resources": {"A": {"DependsOn": ["B", "C"]}}}"#,
        BuildOptions {
            weights: Weighting::Uniform(3.0),
            ..Default::default()
        },
    );

    let reporter = iac_grapher::Reporter::new();
    let report = reporter.generate_report(&graph, "inline");
    assert!(report.edges.iter().all(|e| e.weight == Some(3.0)));

    let dot = reporter.generate_dot(&report);
    assert!(dot.contains("weight=3"));
}

#[test]
fn subgraph_from_template_is_detached() {
    let graph = build(
        r#"{"Resources": {
            "Core": {"DependsOn": ["Db", "Cache"]},
            "Db": {"DependsOn": "Disk"},
            "Cache": {}
        }}"#,
        BuildOptions::default(),
    );

    let sub = graph.subgraph("Core").unwrap();
    assert_eq!(sub.nodes(), &["Core", "Db", "Cache"]);
    // Db -> Disk leaves the neighborhood.
    assert_eq!(sub.edge_count(), 2);

    let mut sub = sub;
    sub.add_edge("Cache", "Core", None, None);
    assert_eq!(graph.edge_count(), 3);
}
