use super::base::{create_node, project_branch, project_single};
use crate::core::model::{step_slots, Element, Path, StepKind};
use crate::core::visualization::{
    NodeId, NodeMapper, NodeMapperService, ProjectionError, VisualizationGraph,
};

/// Protected steps, then the optional `onFallback`.
pub struct CircuitBreakerNodeMapper;

impl NodeMapper for CircuitBreakerNodeMapper {
    fn map(
        &self,
        service: &NodeMapperService<'_>,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError> {
        let [steps, fallback] = step_slots(StepKind::CircuitBreaker) else {
            unreachable!("circuitBreaker declares steps and onFallback");
        };
        let id = create_node(graph, path, element);
        project_branch(service, graph, id, path, element, steps)?;
        project_single(service, graph, id, path, element, fallback)?;
        Ok(id)
    }
}
