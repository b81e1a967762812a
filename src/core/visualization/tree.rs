use super::{NodeId, VisualizationGraph};
use std::fmt;

/// Indented text view of a projected graph, one node per line.
pub struct TreeView<'a>(pub &'a VisualizationGraph);

impl TreeView<'_> {
    fn fmt_label(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let node = self.0.node(id);
        if node.is_placeholder {
            return writeln!(f, "+ (empty)  {}", node.path);
        }
        write!(f, "{}", node.processor_name)?;
        if let Some(component) = &node.component_name {
            write!(f, " [{}]", component)?;
        }
        writeln!(f, "  {}", node.path)
    }

    fn fmt_as_tree(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, node_marker)?;
        self.fmt_label(f, id)?;

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        self.fmt_children(f, id, &child_prefix)
    }

    fn fmt_children(&self, f: &mut fmt::Formatter<'_>, id: NodeId, prefix: &str) -> fmt::Result {
        let children = self.0.children(id);
        for (index, child) in children.iter().enumerate() {
            self.fmt_as_tree(f, *child, prefix, index + 1 == children.len())?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.0.root() else {
            return Ok(());
        };
        self.fmt_label(f, root)?;
        self.fmt_children(f, root, "")
    }
}

pub fn render_tree(graph: &VisualizationGraph) -> String {
    TreeView(graph).to_string()
}
