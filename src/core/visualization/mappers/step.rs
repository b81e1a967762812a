use super::base::BaseNodeMapper;
use super::DATAMAPPER;
use crate::core::model::{Element, Path, StepKind};
use crate::core::visualization::{
    NodeId, NodeMapper, NodeMapperService, ProjectionError, VisualizationGraph,
};

const DATAMAPPER_ID_PREFIX: &str = "kaoto-datamapper-";

/// An embedded data-mapper step: a `step` with a data-mapper id whose only
/// member is a `to` an XSLT endpoint.
pub fn is_data_mapper(element: &Element) -> bool {
    if !element.kind.is(StepKind::Step) {
        return false;
    }
    let has_id = element
        .id()
        .is_some_and(|id| id.starts_with(DATAMAPPER_ID_PREFIX));
    let xslt_only = match element.steps() {
        [only] => {
            only.kind.is(StepKind::To) && only.uri().is_some_and(|uri| uri.starts_with("xslt"))
        }
        _ => false,
    };
    has_id && xslt_only
}

/// Redirects data-mapper steps to their own projector; other steps are generic.
pub struct StepNodeMapper;

impl NodeMapper for StepNodeMapper {
    fn map(
        &self,
        service: &NodeMapperService<'_>,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError> {
        if is_data_mapper(element) {
            return service.mapper_for(DATAMAPPER)?.map(service, graph, path, element);
        }
        BaseNodeMapper.map(service, graph, path, element)
    }
}
