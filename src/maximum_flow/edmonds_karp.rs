use crate::error::Result;
use crate::maximum_flow::graph::FlowNetwork;
use crate::maximum_flow::result::MaxFlowResult;
use crate::maximum_flow::{prepare, MaximumFlowSolver};
use num_traits::{NumAssign, Signed};
use std::collections::VecDeque;
use std::fmt::Debug;
use tracing::{debug, trace};

/// Ford-Fulkerson with breadth-first path selection: every augmenting path has the fewest
/// possible edges, which bounds the number of augmentations by O(VE).
#[derive(Default)]
pub struct EdmondsKarp {
    prev: Vec<Option<usize>>,
    visited: Vec<bool>,
    que: VecDeque<usize>,
}

impl<Flow> MaximumFlowSolver<Flow> for EdmondsKarp
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    fn solve(&mut self, source: usize, sink: usize, network: &mut FlowNetwork<Flow>) -> Result<MaxFlowResult<Flow>> {
        if !prepare(network, source, sink)? {
            return MaxFlowResult::collect(network, source, Flow::zero(), 0, 0);
        }
        debug!(source, sink, num_nodes = network.num_nodes(), num_edges = network.num_edges(), "edmonds-karp started");
        let mut flow = Flow::zero();
        let mut augmentations = 0;
        loop {
            if !self.bfs(source, sink, network) {
                break;
            }

            // calculate delta
            let mut delta = None;
            let mut length = 0;
            let mut v = sink;
            while let Some(edge_id) = self.prev[v] {
                let residual_capacity = network.residual_capacity(edge_id);
                delta = Some(delta.map_or(residual_capacity, |d: Flow| d.min(residual_capacity)));
                v = network.edges()[edge_id].from;
                length += 1;
            }
            let Some(delta) = delta else { break };

            // update flow
            let mut v = sink;
            while let Some(edge_id) = self.prev[v] {
                network.augment(edge_id, delta);
                v = network.edges()[edge_id].from;
            }

            trace!(augmentation = augmentations, ?delta, path_length = length, "edmonds-karp augmenting path");
            flow += delta;
            augmentations += 1;
        }

        debug!(?flow, augmentations, "edmonds-karp finished");
        MaxFlowResult::collect(network, source, flow, augmentations, 0)
    }
}

impl EdmondsKarp {
    // records the parent edge of every vertex discovered before the sink
    fn bfs<Flow>(&mut self, source: usize, sink: usize, network: &FlowNetwork<Flow>) -> bool
    where
        Flow: NumAssign + Signed + Ord + Copy + Debug,
    {
        self.prev.clear();
        self.prev.resize(network.num_nodes(), None);
        self.visited.clear();
        self.visited.resize(network.num_nodes(), false);
        self.que.clear();

        self.visited[source] = true;
        self.que.push_back(source);
        while let Some(u) = self.que.pop_front() {
            for &edge_id in network.adjacent(u) {
                let edge = &network.edges()[edge_id];
                if self.visited[edge.to] || edge.residual_capacity() == Flow::zero() {
                    continue;
                }

                self.visited[edge.to] = true;
                self.prev[edge.to] = Some(edge_id);
                if edge.to == sink {
                    return true;
                }
                self.que.push_back(edge.to);
            }
        }
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![(0, 1, 5)], 0, 1, 5)]
    #[case(vec![(0, 1, 5), (1, 2, 3)], 0, 2, 3)]
    #[case(vec![(0, 1, 2), (0, 2, 2), (1, 3, 2), (2, 3, 2)], 0, 3, 4)]
    #[case(vec![(0, 1, 5), (2, 1, 5)], 0, 2, 0)]
    #[case(vec![(0, 1, 3), (0, 1, 4), (1, 2, 10)], 0, 2, 7)]
    fn small_networks(#[case] edges: Vec<(usize, usize, i64)>, #[case] source: usize, #[case] sink: usize, #[case] expected: i64) {
        let mut network = FlowNetwork::new(4);
        for (from, to, capacity) in edges {
            network.add_edge(from, to, capacity).unwrap();
        }
        let result = EdmondsKarp::default().solve(source, sink, &mut network).unwrap();
        assert_eq!(result.max_flow_value, expected);
    }

    #[test]
    fn augmentations_independent_of_capacity() {
        // the classic diamond which drives a badly chosen dfs to 2 * big iterations
        let big = 1_000_000_i64;
        let mut network = FlowNetwork::new(4);
        network.add_edge(0, 1, big).unwrap();
        network.add_edge(0, 2, big).unwrap();
        network.add_edge(1, 2, 1).unwrap();
        network.add_edge(1, 3, big).unwrap();
        network.add_edge(2, 3, big).unwrap();

        let result = EdmondsKarp::default().solve(0, 3, &mut network).unwrap();
        assert_eq!(result.max_flow_value, 2 * big);
        assert_eq!(result.augmentations, 2);
    }

    #[test]
    fn prefers_the_shortest_path() {
        let mut network = FlowNetwork::new(5);
        network.add_edge(0, 1, 1).unwrap();
        network.add_edge(1, 2, 1).unwrap();
        network.add_edge(2, 4, 1).unwrap();
        let direct = network.add_edge(0, 3, 1).unwrap();
        network.add_edge(3, 4, 1).unwrap();
        network.add_edge(1, 3, 1).unwrap();

        let mut solver = EdmondsKarp::default();
        assert!(solver.bfs(0, 4, &network));
        assert_eq!(solver.prev[3], Some(direct));
    }
}
