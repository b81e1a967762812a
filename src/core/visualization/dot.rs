use super::{NodeId, VisualizationGraph, VisualizationNode};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt;

/// Node weight carrying display information.
struct StepNode {
    processor: String,
    component: Option<String>,
    is_group: bool,
    is_placeholder: bool,
}

impl StepNode {
    /// DOT label text; the component goes on a second line.
    fn label(&self) -> String {
        match &self.component {
            Some(component) => format!("{}\\n{}", escape(&self.processor), escape(component)),
            None => escape(&self.processor),
        }
    }
}

impl fmt::Display for StepNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.component {
            Some(component) => write!(f, "{} [{}]", self.processor, component),
            None => write!(f, "{}", self.processor),
        }
    }
}

impl From<&VisualizationNode> for StepNode {
    fn from(node: &VisualizationNode) -> Self {
        Self {
            processor: node.processor_name.clone(),
            component: node.component_name.clone(),
            is_group: node.is_group,
            is_placeholder: node.is_placeholder,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Tree edges are solid; the sequential chain is dashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    Child,
    Next,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Child => Ok(()),
            EdgeKind::Next => write!(f, "next"),
        }
    }
}

fn build_graph(graph: &VisualizationGraph) -> DiGraph<StepNode, EdgeKind> {
    let mut dot_graph = DiGraph::new();
    let mut node_map: HashMap<NodeId, NodeIndex> = HashMap::new();

    for node in graph.iter() {
        node_map.insert(node.id, dot_graph.add_node(StepNode::from(node)));
    }

    for node in graph.iter() {
        let from = node_map[&node.id];
        for child in &node.children {
            if let Some(&to) = node_map.get(child) {
                dot_graph.add_edge(from, to, EdgeKind::Child);
            }
        }
        if let Some(&to) = node.next.as_ref().and_then(|next| node_map.get(next)) {
            dot_graph.add_edge(from, to, EdgeKind::Next);
        }
    }

    dot_graph
}

/// Render a projected graph as a Graphviz DOT string using petgraph.
pub fn to_dot(graph: &VisualizationGraph) -> String {
    let dot_graph = build_graph(graph);
    let dot = Dot::with_attr_getters(
        &dot_graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, edge| match edge.weight() {
            EdgeKind::Child => String::new(),
            EdgeKind::Next => "style=dashed".to_string(),
        },
        &|_, (_, node)| {
            let shape = if node.is_placeholder {
                " shape=box style=dotted"
            } else if node.is_group {
                " shape=box"
            } else {
                ""
            };
            format!("label = \"{}\"{}", node.label(), shape)
        },
    );
    format!("{}", dot)
}
