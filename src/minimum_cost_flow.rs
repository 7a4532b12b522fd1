pub mod graph;
pub mod successive_shortest_path;

use crate::error::Result;
use crate::minimum_cost_flow::graph::CostFlowNetwork;
use crate::minimum_cost_flow::successive_shortest_path::{MinCostFlowResult, SuccessiveShortestPath};
use num_traits::{NumAssign, Signed};
use std::fmt::Debug;

/// Pushes the maximum s-t flow at minimum total cost with default options.
pub fn min_cost_max_flow<Flow>(network: &mut CostFlowNetwork<Flow>, source: usize, sink: usize) -> Result<MinCostFlowResult<Flow>>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    SuccessiveShortestPath::default().solve(source, sink, network)
}
