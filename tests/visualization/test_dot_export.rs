use routeforge::core::catalog::EmptyCatalog;
use routeforge::core::transform::{parse_document, ParseOutcome};
use routeforge::core::visualization::{to_dot, VisualizationGraph};

fn route_graph(text: &str) -> VisualizationGraph {
    let ParseOutcome::Supported(document) = parse_document(text, &EmptyCatalog).unwrap() else {
        panic!("expected a supported document");
    };
    let entity = document.visual_entities().next().unwrap();
    entity.to_graph(&EmptyCatalog).unwrap()
}

fn edge_counts(graph: &VisualizationGraph) -> (usize, usize) {
    let children = graph.iter().map(|node| node.children.len()).sum();
    let next = graph.iter().filter(|node| node.next.is_some()).count();
    (children, next)
}

#[test]
fn test_every_tree_and_chain_edge_is_exported() {
    let graph = route_graph(
        r#"
- route:
    from:
      uri: timer:tick
      steps:
        - filter:
            simple: ${body} != null
            steps:
              - log: kept
              - to: direct:kept
        - to: direct:end
"#,
    );
    let (children, next) = edge_counts(&graph);
    let dot = to_dot(&graph);
    assert!(dot.starts_with("digraph {"));
    assert_eq!(dot.matches(" -> ").count(), children + next);
    assert_eq!(dot.matches("style=dashed").count(), next);
    assert_eq!(next, 3);
}

#[test]
fn test_labels_carry_component_names() {
    let graph = route_graph("- from:\n    uri: kafka:orders\n    steps:\n      - to: log:audit\n");
    let dot = to_dot(&graph);
    assert!(dot.contains(r#"label = "from\nkafka""#));
    assert!(dot.contains(r#"label = "to\nlog""#));
    assert!(!dot.contains("\\l"));
}

#[test]
fn test_placeholders_are_dotted_boxes() {
    let graph = route_graph("- from:\n    uri: timer:tick\n");
    let dot = to_dot(&graph);
    assert_eq!(dot.matches("style=dotted").count(), 1);
    assert!(dot.contains("placeholder"));
}

#[test]
fn test_empty_graph_exports_an_empty_digraph() {
    let dot = to_dot(&VisualizationGraph::new());
    assert!(dot.starts_with("digraph {"));
    assert!(!dot.contains("->"));
}
