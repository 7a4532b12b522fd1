pub mod dinic;
pub mod edmonds_karp;
pub mod ford_fulkerson;
pub mod graph;
pub mod result;

use crate::error::Result;
use crate::maximum_flow::dinic::Dinic;
use crate::maximum_flow::edmonds_karp::EdmondsKarp;
use crate::maximum_flow::ford_fulkerson::FordFulkerson;
use crate::maximum_flow::graph::FlowNetwork;
use crate::maximum_flow::result::MaxFlowResult;
use num_traits::{NumAssign, Signed};
use std::fmt::Debug;

pub trait MaximumFlowSolver<Flow> {
    /// Resets the flow of `network`, then pushes the maximum s-t flow through it.
    fn solve(&mut self, source: usize, sink: usize, network: &mut FlowNetwork<Flow>) -> Result<MaxFlowResult<Flow>>;
}

#[derive(Default, PartialEq, Eq, Debug, Clone, Copy)]
pub enum MaxFlowAlgorithm {
    FordFulkerson,
    EdmondsKarp,
    #[default]
    Dinic,
}

impl MaxFlowAlgorithm {
    pub const ALL: [MaxFlowAlgorithm; 3] = [MaxFlowAlgorithm::FordFulkerson, MaxFlowAlgorithm::EdmondsKarp, MaxFlowAlgorithm::Dinic];

    pub fn name(&self) -> &'static str {
        match self {
            MaxFlowAlgorithm::FordFulkerson => "ford-fulkerson",
            MaxFlowAlgorithm::EdmondsKarp => "edmonds-karp",
            MaxFlowAlgorithm::Dinic => "dinic",
        }
    }
}

pub fn max_flow<Flow>(algorithm: MaxFlowAlgorithm, network: &mut FlowNetwork<Flow>, source: usize, sink: usize) -> Result<MaxFlowResult<Flow>>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    match algorithm {
        MaxFlowAlgorithm::FordFulkerson => FordFulkerson::default().solve(source, sink, network),
        MaxFlowAlgorithm::EdmondsKarp => EdmondsKarp::default().solve(source, sink, network),
        MaxFlowAlgorithm::Dinic => Dinic::default().solve(source, sink, network),
    }
}

// validates the terminals and clears any flow left by a previous run;
// returns false when there is nothing to push
pub(crate) fn prepare<Flow>(network: &mut FlowNetwork<Flow>, source: usize, sink: usize) -> Result<bool>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    network.check_vertex(source)?;
    network.check_vertex(sink)?;
    network.reset_flow();
    Ok(source != sink && network.num_edges() > 0)
}
