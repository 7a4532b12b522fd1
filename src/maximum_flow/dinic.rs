use crate::error::Result;
use crate::maximum_flow::graph::FlowNetwork;
use crate::maximum_flow::result::MaxFlowResult;
use crate::maximum_flow::{prepare, MaximumFlowSolver};
use num_traits::{NumAssign, Signed};
use std::collections::VecDeque;
use std::fmt::Debug;
use tracing::{debug, trace};

const UNREACHABLE: usize = usize::MAX;

/// Blocking flows on level graphs. O(V^2 E).
#[derive(Default)]
pub struct Dinic {
    levels: Vec<usize>,
    current_edge: Vec<usize>,
    path: Vec<usize>,
    que: VecDeque<usize>,
}

impl<Flow> MaximumFlowSolver<Flow> for Dinic
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    fn solve(&mut self, source: usize, sink: usize, network: &mut FlowNetwork<Flow>) -> Result<MaxFlowResult<Flow>> {
        if !prepare(network, source, sink)? {
            return MaxFlowResult::collect(network, source, Flow::zero(), 0, 0);
        }
        debug!(source, sink, num_nodes = network.num_nodes(), num_edges = network.num_edges(), "dinic started");
        self.current_edge.resize(network.num_nodes(), 0);

        let mut flow = Flow::zero();
        let mut augmentations = 0;
        let mut phases = 0;
        loop {
            self.update_levels(source, network);

            // no s-t path
            if self.levels[sink] == UNREACHABLE {
                break;
            }

            self.current_edge.fill(0);
            let (delta, paths) = self.blocking_flow(source, sink, network);
            trace!(phase = phases, sink_level = self.levels[sink], ?delta, paths, "dinic blocking flow");
            flow += delta;
            augmentations += paths;
            phases += 1;
        }

        debug!(?flow, phases, augmentations, "dinic finished");
        MaxFlowResult::collect(network, source, flow, augmentations, phases)
    }
}

impl Dinic {
    // O(n + m)
    // bfs distance from source in the residual network, UNREACHABLE if there is no path
    fn update_levels<Flow>(&mut self, source: usize, network: &FlowNetwork<Flow>)
    where
        Flow: NumAssign + Signed + Ord + Copy + Debug,
    {
        self.levels.clear();
        self.levels.resize(network.num_nodes(), UNREACHABLE);
        self.que.clear();
        self.levels[source] = 0;
        self.que.push_back(source);

        while let Some(u) = self.que.pop_front() {
            for &edge_id in network.adjacent(u) {
                let edge = &network.edges()[edge_id];
                if edge.residual_capacity() > Flow::zero() && self.levels[edge.to] == UNREACHABLE {
                    self.levels[edge.to] = self.levels[u] + 1;
                    self.que.push_back(edge.to);
                }
            }
        }
    }

    #[inline]
    fn is_admissible_edge<Flow>(&self, u: usize, edge_id: usize, network: &FlowNetwork<Flow>) -> bool
    where
        Flow: NumAssign + Signed + Ord + Copy + Debug,
    {
        let edge = &network.edges()[edge_id];
        edge.residual_capacity() > Flow::zero() && self.levels[edge.to] == self.levels[u] + 1
    }

    // Repeated dfs over admissible edges with an explicit stack. `current_edge[u]` only moves
    // forward within a phase, so every edge is abandoned at most once.
    // Returns the pushed amount and the number of augmenting paths.
    fn blocking_flow<Flow>(&mut self, source: usize, sink: usize, network: &mut FlowNetwork<Flow>) -> (Flow, usize)
    where
        Flow: NumAssign + Signed + Ord + Copy + Debug,
    {
        let mut pushed = Flow::zero();
        let mut paths = 0;
        self.path.clear();

        let mut u = source;
        loop {
            if u == sink {
                let Some(delta) = self.path.iter().map(|&edge_id| network.residual_capacity(edge_id)).min() else {
                    break;
                };

                // push, then retreat to the tail of the first saturated edge
                let mut first_saturated = self.path.len();
                for (i, &edge_id) in self.path.iter().enumerate() {
                    network.augment(edge_id, delta);
                    if first_saturated == self.path.len() && network.residual_capacity(edge_id) == Flow::zero() {
                        first_saturated = i;
                    }
                }
                self.path.truncate(first_saturated);
                pushed += delta;
                paths += 1;

                u = self.path.last().map_or(source, |&edge_id| network.edges()[edge_id].to);
                continue;
            }

            let adjacent = network.adjacent(u);
            while self.current_edge[u] < adjacent.len() && !self.is_admissible_edge(u, adjacent[self.current_edge[u]], network) {
                self.current_edge[u] += 1;
            }

            if let Some(&edge_id) = adjacent.get(self.current_edge[u]) {
                // advance
                self.path.push(edge_id);
                u = network.edges()[edge_id].to;
                continue;
            }

            // dead end: u is useless for the rest of this phase
            self.levels[u] = UNREACHABLE;
            match self.path.pop() {
                Some(edge_id) => {
                    u = network.edges()[edge_id].from;
                    self.current_edge[u] += 1;
                }
                None => break,
            }
        }

        (pushed, paths)
    }
}
