use super::{ensure_id, VisualEntity};
use crate::core::catalog::CatalogLookup;
use crate::core::model::{Element, Path, StepKind};
use crate::core::visualization::{NodeMapperService, ProjectionError, VisualizationGraph};

/// A `route`: one `from` source and the steps it feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntity {
    root: Element,
}

impl RouteEntity {
    pub fn new(mut root: Element) -> Self {
        ensure_id(&mut root);
        Self { root }
    }
}

impl VisualEntity for RouteEntity {
    fn kind(&self) -> StepKind {
        StepKind::Route
    }

    fn root(&self) -> &Element {
        &self.root
    }

    fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    fn source_path(&self) -> Option<Path> {
        Some(self.root_path().field("from"))
    }

    /// A group node for the route holding the source followed by the source's
    /// own steps, one level up.
    fn to_graph(&self, catalog: &dyn CatalogLookup) -> Result<VisualizationGraph, ProjectionError> {
        let service = NodeMapperService::new(catalog);
        let root_path = self.root_path();
        let mut graph = VisualizationGraph::new();
        let group = graph.add_node(root_path.clone(), StepKind::Route.name(), None);
        graph.node_mut(group).is_group = true;
        graph.set_root(group);

        let Some(source) = self.root.child("from") else {
            return Ok(graph);
        };
        let source_id = service.project(&mut graph, &root_path.field("from"), source)?;
        graph.append_child(group, source_id);
        let flattened = graph.splice_children(source_id, group);
        if let Some(first) = flattened.first() {
            graph.link(source_id, *first);
        }
        tracing::debug!(route = %self.id(), nodes = graph.len(), "Projected route");
        Ok(graph)
    }
}
