use super::base::create_node;
use super::DATAMAPPER;
use crate::core::model::{Element, Path};
use crate::core::visualization::{
    NodeId, NodeMapper, NodeMapperService, ProjectionError, VisualizationGraph,
};

/// Data-mapper steps render as a single leaf; the generated XSLT call stays hidden.
pub struct DataMapperNodeMapper;

impl NodeMapper for DataMapperNodeMapper {
    fn map(
        &self,
        _service: &NodeMapperService<'_>,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError> {
        let id = create_node(graph, path, element);
        graph.node_mut(id).component_name = Some(DATAMAPPER.to_string());
        Ok(id)
    }
}
