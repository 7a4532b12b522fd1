use crate::error::Result;
use crate::maximum_flow::graph::{FlowEdge, FlowNetwork};
use num_traits::{NumAssign, Signed};
use std::fmt::Debug;

/// Partition of the vertices after a solve: `source_side` is everything reachable from the
/// source through positive residual capacity, `sink_side` the complement. Both are sorted.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct MinCut {
    pub source_side: Vec<usize>,
    pub sink_side: Vec<usize>,
}

impl MinCut {
    pub fn contains_source_side(&self, vertex: usize) -> bool {
        self.source_side.binary_search(&vertex).is_ok()
    }

    /// Ids of inserted arcs going from the source side to the sink side.
    pub fn cut_edges<Flow>(&self, network: &FlowNetwork<Flow>) -> Vec<usize>
    where
        Flow: NumAssign + Signed + Ord + Copy + Debug,
    {
        network
            .forward_edges()
            .filter(|(_, e)| self.contains_source_side(e.from) && !self.contains_source_side(e.to))
            .map(|(edge_id, _)| edge_id)
            .collect()
    }

    pub fn capacity<Flow>(&self, network: &FlowNetwork<Flow>) -> Flow
    where
        Flow: NumAssign + Signed + Ord + Copy + Debug,
    {
        self.cut_edges(network).into_iter().fold(Flow::zero(), |sum, edge_id| sum + network.edges()[edge_id].capacity)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct MaxFlowResult<Flow> {
    pub max_flow_value: Flow,
    pub flow_edges: Vec<FlowEdge<Flow>>,
    pub min_cut: MinCut,
    pub found_flow: bool,
    /// augmenting paths pushed
    pub augmentations: usize,
    /// level-graph rebuilds; only Dinic counts these
    pub phases: usize,
}

impl<Flow> MaxFlowResult<Flow>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    pub(crate) fn collect(network: &FlowNetwork<Flow>, source: usize, max_flow_value: Flow, augmentations: usize, phases: usize) -> Result<Self> {
        Ok(MaxFlowResult {
            max_flow_value,
            flow_edges: network.flow_edges(),
            min_cut: network.minimum_cut(source)?,
            found_flow: max_flow_value > Flow::zero(),
            augmentations,
            phases,
        })
    }
}
