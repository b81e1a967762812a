use super::base::{create_node, project_branch, project_clauses, project_single};
use crate::core::model::{step_slots, Element, Path, StepKind};
use crate::core::visualization::{
    NodeId, NodeMapper, NodeMapperService, ProjectionError, VisualizationGraph,
};

/// Guarded steps, then `doCatch` clauses, then the optional `doFinally`.
pub struct DoTryNodeMapper;

impl NodeMapper for DoTryNodeMapper {
    fn map(
        &self,
        service: &NodeMapperService<'_>,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError> {
        let [steps, catches, finally] = step_slots(StepKind::DoTry) else {
            unreachable!("doTry declares steps, doCatch and doFinally");
        };
        let id = create_node(graph, path, element);
        project_branch(service, graph, id, path, element, steps)?;
        project_clauses(service, graph, id, path, element, catches)?;
        project_single(service, graph, id, path, element, finally)?;
        Ok(id)
    }
}
