use crate::error::Result;
use crate::maximum_flow::graph::FlowNetwork;
use crate::maximum_flow::result::MaxFlowResult;
use crate::maximum_flow::{prepare, MaximumFlowSolver};
use num_traits::{NumAssign, Signed};
use std::fmt::Debug;
use tracing::{debug, trace};

/// Augments along any path found by depth-first search.
///
/// The number of iterations depends on the capacities, not only on the size of the network.
#[derive(Default)]
pub struct FordFulkerson {
    visited: Vec<bool>,
    current_edge: Vec<usize>,
    path: Vec<usize>,
}

impl<Flow> MaximumFlowSolver<Flow> for FordFulkerson
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    fn solve(&mut self, source: usize, sink: usize, network: &mut FlowNetwork<Flow>) -> Result<MaxFlowResult<Flow>> {
        if !prepare(network, source, sink)? {
            return MaxFlowResult::collect(network, source, Flow::zero(), 0, 0);
        }
        debug!(source, sink, num_nodes = network.num_nodes(), num_edges = network.num_edges(), "ford-fulkerson started");
        self.visited.resize(network.num_nodes(), false);
        self.current_edge.resize(network.num_nodes(), 0);

        let mut flow = Flow::zero();
        let mut augmentations = 0;
        while let Some(delta) = self.augment_once(source, sink, network) {
            trace!(augmentation = augmentations, ?delta, path_length = self.path.len(), "ford-fulkerson augmenting path");
            flow += delta;
            augmentations += 1;
        }

        debug!(?flow, augmentations, "ford-fulkerson finished");
        MaxFlowResult::collect(network, source, flow, augmentations, 0)
    }
}

impl FordFulkerson {
    // dfs with an explicit stack: `path` holds the tree edges from source to the current vertex
    fn augment_once<Flow>(&mut self, source: usize, sink: usize, network: &mut FlowNetwork<Flow>) -> Option<Flow>
    where
        Flow: NumAssign + Signed + Ord + Copy + Debug,
    {
        self.visited.fill(false);
        self.current_edge.fill(0);
        self.path.clear();

        self.visited[source] = true;
        let mut u = source;
        while u != sink {
            let adjacent = network.adjacent(u);
            let mut next = None;
            while self.current_edge[u] < adjacent.len() {
                let edge_id = adjacent[self.current_edge[u]];
                self.current_edge[u] += 1;
                let edge = &network.edges()[edge_id];
                if !self.visited[edge.to] && edge.residual_capacity() > Flow::zero() {
                    next = Some(edge_id);
                    break;
                }
            }

            match next {
                Some(edge_id) => {
                    u = network.edges()[edge_id].to;
                    self.visited[u] = true;
                    self.path.push(edge_id);
                }
                // retreat
                None => u = network.edges()[self.path.pop()?].from,
            }
        }

        let delta = self.path.iter().map(|&edge_id| network.residual_capacity(edge_id)).min()?;
        for &edge_id in self.path.iter() {
            network.augment(edge_id, delta);
        }
        Some(delta)
    }
}
