use crate::core::model::{element_slots, Element, Path, SlotShape, StepSlot, PLACEHOLDER};
use crate::core::visualization::{
    NodeId, NodeMapper, NodeMapperService, ProjectionError, VisualizationGraph,
};

/// Generic projector: one node, then every slot in table order.
pub struct BaseNodeMapper;

impl NodeMapper for BaseNodeMapper {
    fn map(
        &self,
        service: &NodeMapperService<'_>,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError> {
        let id = create_node(graph, path, element);
        for slot in element_slots(element, service.catalog()) {
            project_slot(service, graph, id, path, element, &slot)?;
        }
        Ok(id)
    }
}

pub fn create_node(graph: &mut VisualizationGraph, path: &Path, element: &Element) -> NodeId {
    graph.add_node(
        path.clone(),
        element.kind.name(),
        element.component_name(),
    )
}

pub fn project_slot(
    service: &NodeMapperService<'_>,
    graph: &mut VisualizationGraph,
    parent: NodeId,
    path: &Path,
    element: &Element,
    slot: &StepSlot,
) -> Result<Vec<NodeId>, ProjectionError> {
    match slot.shape {
        SlotShape::Branch => project_branch(service, graph, parent, path, element, slot),
        SlotShape::SingleClause => project_single(service, graph, parent, path, element, slot),
        SlotShape::ArrayClause => project_clauses(service, graph, parent, path, element, slot),
    }
}

/// Sequential members chained previous/next; an empty branch yields one placeholder.
pub fn project_branch(
    service: &NodeMapperService<'_>,
    graph: &mut VisualizationGraph,
    parent: NodeId,
    path: &Path,
    element: &Element,
    slot: &StepSlot,
) -> Result<Vec<NodeId>, ProjectionError> {
    let members = element.elements(&slot.name);
    if members.is_empty() {
        let placeholder = graph.add_placeholder(path.field(&slot.name).index(0).field(PLACEHOLDER));
        graph.append_child(parent, placeholder);
        return Ok(vec![placeholder]);
    }

    let mut ids = Vec::with_capacity(members.len());
    for (index, member) in members.iter().enumerate() {
        let member_path = slot.member_path(path, index, member);
        let id = service.project(graph, &member_path, member)?;
        graph.append_child(parent, id);
        if let Some(previous) = ids.last() {
            graph.link(*previous, id);
        }
        ids.push(id);
    }
    Ok(ids)
}

/// At most one child: absent field means no child, an empty element still projects.
pub fn project_single(
    service: &NodeMapperService<'_>,
    graph: &mut VisualizationGraph,
    parent: NodeId,
    path: &Path,
    element: &Element,
    slot: &StepSlot,
) -> Result<Vec<NodeId>, ProjectionError> {
    let Some(child) = element.child(&slot.name) else {
        return Ok(Vec::new());
    };
    let id = service.project(graph, &slot.member_path(path, 0, child), child)?;
    graph.append_child(parent, id);
    Ok(vec![id])
}

/// Independent clauses: children by index, never chained.
pub fn project_clauses(
    service: &NodeMapperService<'_>,
    graph: &mut VisualizationGraph,
    parent: NodeId,
    path: &Path,
    element: &Element,
    slot: &StepSlot,
) -> Result<Vec<NodeId>, ProjectionError> {
    let mut ids = Vec::new();
    for (index, member) in element.elements(&slot.name).iter().enumerate() {
        let id = service.project(graph, &slot.member_path(path, index, member), member)?;
        graph.append_child(parent, id);
        ids.push(id);
    }
    Ok(ids)
}
