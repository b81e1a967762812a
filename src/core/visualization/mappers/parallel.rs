use super::base::BaseNodeMapper;
use crate::core::model::{Element, Path};
use crate::core::visualization::{
    NodeId, NodeMapper, NodeMapperService, ProjectionError, VisualizationGraph,
};

/// Fan-out kinds (`multicast`, `loadBalance`): every branch member runs in
/// parallel, so no child keeps a previous/next link to a sibling.
pub struct ParallelNodeMapper;

impl NodeMapper for ParallelNodeMapper {
    fn map(
        &self,
        service: &NodeMapperService<'_>,
        graph: &mut VisualizationGraph,
        path: &Path,
        element: &Element,
    ) -> Result<NodeId, ProjectionError> {
        let id = BaseNodeMapper.map(service, graph, path, element)?;
        let children = graph.children(id).to_vec();
        for child in children {
            graph.clear_links(child);
        }
        Ok(id)
    }
}
