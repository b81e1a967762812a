//! Projection of element trees into visualization graphs.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Tree edges
//! (`parent`/`children`) and the sequential chain (`previous`/`next`) are kept
//! separately so alternative and parallel branches never present a next step
//! to each other. Graphs are rebuilt after every edit.

pub mod dot;
pub mod mappers;
pub mod tree;

use crate::core::catalog::CatalogLookup;
use crate::core::model::{Element, Path};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

pub use dot::to_dot;
pub use mappers::{
    BaseNodeMapper, ChoiceNodeMapper, CircuitBreakerNodeMapper, DataMapperNodeMapper,
    DoTryNodeMapper, ParallelNodeMapper, StepNodeMapper, DATAMAPPER,
};
pub use tree::render_tree;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("no projector registered for kind '{0}' and no default projector")]
    UnregisteredKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationNode {
    pub id: NodeId,
    pub path: Path,
    pub processor_name: String,
    pub component_name: Option<String>,
    pub is_group: bool,
    pub is_placeholder: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub previous: Option<NodeId>,
    pub next: Option<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualizationGraph {
    root: Option<NodeId>,
    nodes: Vec<VisualizationNode>,
}

impl VisualizationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        path: Path,
        processor_name: impl Into<String>,
        component_name: Option<String>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(VisualizationNode {
            id,
            path,
            processor_name: processor_name.into(),
            component_name,
            is_group: false,
            is_placeholder: false,
            parent: None,
            children: Vec::new(),
            previous: None,
            next: None,
        });
        id
    }

    pub fn add_placeholder(&mut self, path: Path) -> NodeId {
        let id = self.add_node(path, "placeholder", None);
        self.nodes[id.0].is_placeholder = true;
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn get(&self, id: NodeId) -> Option<&VisualizationNode> {
        self.nodes.get(id.0)
    }

    /// Node by id. Ids are only handed out by this graph, so they are always valid.
    pub fn node(&self, id: NodeId) -> &VisualizationNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut VisualizationNode {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(child);
        parent_node.is_group = true;
    }

    /// Chains `previous` → `next` in sequential flow order.
    pub fn link(&mut self, previous: NodeId, next: NodeId) {
        self.nodes[previous.0].next = Some(next);
        self.nodes[next.0].previous = Some(previous);
    }

    pub fn clear_links(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        node.previous = None;
        node.next = None;
    }

    /// Re-parents every child of `from` onto `to`, keeping their order.
    pub fn splice_children(&mut self, from: NodeId, to: NodeId) -> Vec<NodeId> {
        let moved = std::mem::take(&mut self.nodes[from.0].children);
        self.nodes[from.0].is_group = false;
        for child in &moved {
            self.append_child(to, *child);
        }
        moved
    }

    pub fn find(&self, path: &Path) -> Option<NodeId> {
        self.nodes.iter().find(|node| &node.path == path).map(|node| node.id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualizationNode> {
        self.nodes.iter()
    }
}

/// Per-kind projection strategy.
pub trait NodeMapper {
    fn map(
        &self,
        service: &NodeMapperService<'_>,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError>;
}

/// Registry dispatching each element to the projector for its kind.
pub struct NodeMapperService<'a> {
    catalog: &'a dyn CatalogLookup,
    mappers: HashMap<String, Box<dyn NodeMapper>>,
    default: Option<Box<dyn NodeMapper>>,
}

impl<'a> NodeMapperService<'a> {
    /// Registry with every built-in projector and the generic fallback.
    pub fn new(catalog: &'a dyn CatalogLookup) -> Self {
        let mut service = Self::empty(catalog);
        service.register("choice", Box::new(ChoiceNodeMapper));
        service.register("doTry", Box::new(DoTryNodeMapper));
        service.register("circuitBreaker", Box::new(CircuitBreakerNodeMapper));
        service.register("multicast", Box::new(ParallelNodeMapper));
        service.register("loadBalance", Box::new(ParallelNodeMapper));
        service.register("step", Box::new(StepNodeMapper));
        service.register(DATAMAPPER, Box::new(DataMapperNodeMapper));
        service.set_default(Box::new(BaseNodeMapper));
        service
    }

    /// Registry with no projectors at all.
    pub fn empty(catalog: &'a dyn CatalogLookup) -> Self {
        Self {
            catalog,
            mappers: HashMap::new(),
            default: None,
        }
    }

    pub fn register(&mut self, kind: impl Into<String>, mapper: Box<dyn NodeMapper>) {
        self.mappers.insert(kind.into(), mapper);
    }

    pub fn set_default(&mut self, mapper: Box<dyn NodeMapper>) {
        self.default = Some(mapper);
    }

    pub fn catalog(&self) -> &'a dyn CatalogLookup {
        self.catalog
    }

    pub fn mapper_for(&self, kind: &str) -> Result<&dyn NodeMapper, ProjectionError> {
        self.mappers
            .get(kind)
            .or(self.default.as_ref())
            .map(|mapper| mapper.as_ref())
            .ok_or_else(|| ProjectionError::UnregisteredKind(kind.to_string()))
    }

    pub fn project(
        &self,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError> {
        self.mapper_for(element.kind.name())?
            .map(self, graph, path, element)
    }

    /// Projects `element` into a fresh graph rooted at the resulting node.
    pub fn project_tree(&self, path: &Path, element: &Element) -> Result<VisualizationGraph, ProjectionError> {
        let mut graph = VisualizationGraph::new();
        let root = self.project(&mut graph, path, element)?;
        graph.set_root(root);
        tracing::debug!(path = %path, nodes = graph.len(), "Projected element tree");
        Ok(graph)
    }
}
