use super::base::{create_node, project_clauses, project_single};
use crate::core::model::{step_slots, Element, Path, StepKind};
use crate::core::visualization::{
    NodeId, NodeMapper, NodeMapperService, ProjectionError, VisualizationGraph,
};

/// `when` clauses first, then the optional `otherwise`.
pub struct ChoiceNodeMapper;

impl NodeMapper for ChoiceNodeMapper {
    fn map(
        &self,
        service: &NodeMapperService<'_>,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError> {
        let [when, otherwise] = step_slots(StepKind::Choice) else {
            unreachable!("choice declares when and otherwise");
        };
        let id = create_node(graph, path, element);
        project_clauses(service, graph, id, path, element, when)?;
        project_single(service, graph, id, path, element, otherwise)?;
        Ok(id)
    }
}
