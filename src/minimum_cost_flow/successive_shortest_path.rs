use crate::error::{FlowError, Result};
use crate::minimum_cost_flow::graph::{CostFlowEdge, CostFlowNetwork};
use num_traits::{NumAssign, Signed};
use std::collections::VecDeque;
use std::fmt::Debug;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinCostFlowOptions<Flow> {
    /// Stop once this much flow has been sent. `None` pushes the maximum flow.
    pub flow_limit: Option<Flow>,
    /// Upper bound on the number of augmenting paths.
    pub max_augmentations: Option<usize>,
}

impl<Flow> Default for MinCostFlowOptions<Flow> {
    fn default() -> Self {
        MinCostFlowOptions { flow_limit: None, max_augmentations: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AugmentingPath<Flow> {
    pub amount: Flow,
    pub unit_cost: Flow,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinCostFlowResult<Flow> {
    pub max_flow: Flow,
    pub min_cost: Flow,
    pub flow_edges: Vec<CostFlowEdge<Flow>>,
    /// in the order they were pushed; `unit_cost` never decreases
    pub augmentations: Vec<AugmentingPath<Flow>>,
    /// false when `max_augmentations` stopped the run while an augmenting path was still left
    pub complete: bool,
}

/// Successive shortest paths with SPFA as the shortest-path oracle.
///
/// Reverse arcs have negative cost, so a label-correcting search is used instead of Dijkstra.
/// A negative-cost cycle reachable from the source is reported as [`FlowError::NegativeCycle`].
pub struct SuccessiveShortestPath<Flow> {
    options: MinCostFlowOptions<Flow>,
    dist: Vec<Option<Flow>>,
    prev: Vec<Option<usize>>,
    path_length: Vec<usize>,
    in_queue: Vec<bool>,
    que: VecDeque<usize>,
}

impl<Flow> Default for SuccessiveShortestPath<Flow> {
    fn default() -> Self {
        SuccessiveShortestPath {
            options: MinCostFlowOptions::default(),
            dist: Vec::new(),
            prev: Vec::new(),
            path_length: Vec::new(),
            in_queue: Vec::new(),
            que: VecDeque::new(),
        }
    }
}

impl<Flow> SuccessiveShortestPath<Flow>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    pub fn new(options: MinCostFlowOptions<Flow>) -> Self {
        SuccessiveShortestPath { options, ..Default::default() }
    }

    pub fn options(&self) -> &MinCostFlowOptions<Flow> {
        &self.options
    }

    pub fn solve(&mut self, source: usize, sink: usize, network: &mut CostFlowNetwork<Flow>) -> Result<MinCostFlowResult<Flow>> {
        network.check_vertex(source)?;
        network.check_vertex(sink)?;
        network.reset_flow();
        debug!(source, sink, num_nodes = network.num_nodes(), num_edges = network.num_edges(), "successive shortest path started");

        let mut flow = Flow::zero();
        let mut cost = Flow::zero();
        let mut augmentations = Vec::new();
        let mut complete = true;

        while source != sink {
            if self.options.flow_limit.is_some_and(|limit| flow >= limit) {
                break;
            }
            if self.options.max_augmentations.is_some_and(|limit| augmentations.len() >= limit) {
                self.calculate_distance(source, network)?;
                complete = self.dist[sink].is_none();
                break;
            }

            self.calculate_distance(source, network)?;
            let Some(unit_cost) = self.dist[sink] else {
                break;
            };

            // calculate delta
            let mut delta = self.options.flow_limit.map(|limit| limit - flow);
            let mut v = sink;
            while let Some(edge_id) = self.prev[v] {
                let residual_capacity = network.edges()[edge_id].residual_capacity();
                delta = Some(delta.map_or(residual_capacity, |d| d.min(residual_capacity)));
                v = network.edges()[edge_id].from;
            }
            let Some(delta) = delta else {
                break;
            };

            // update flow
            let mut v = sink;
            while let Some(edge_id) = self.prev[v] {
                network.augment(edge_id, delta);
                v = network.edges()[edge_id].from;
            }

            let length = self.path_length[sink];
            trace!(augmentation = augmentations.len(), ?delta, ?unit_cost, path_length = length, "successive shortest path augmentation");
            flow += delta;
            cost += delta * unit_cost;
            augmentations.push(AugmentingPath { amount: delta, unit_cost, length });
        }

        debug!(?flow, ?cost, augmentations = augmentations.len(), complete, "successive shortest path finished");
        Ok(MinCostFlowResult { max_flow: flow, min_cost: cost, flow_edges: network.flow_edges(), augmentations, complete })
    }

    // SPFA from `source` over positive-residual arcs.
    // A shortest path never needs `num_nodes` edges; reaching that length means a negative cycle.
    fn calculate_distance(&mut self, source: usize, network: &CostFlowNetwork<Flow>) -> Result<()> {
        let num_nodes = network.num_nodes();
        self.dist.clear();
        self.dist.resize(num_nodes, None);
        self.prev.clear();
        self.prev.resize(num_nodes, None);
        self.path_length.clear();
        self.path_length.resize(num_nodes, 0);
        self.in_queue.clear();
        self.in_queue.resize(num_nodes, false);
        self.que.clear();

        self.dist[source] = Some(Flow::zero());
        self.in_queue[source] = true;
        self.que.push_back(source);

        while let Some(u) = self.que.pop_front() {
            self.in_queue[u] = false;
            let Some(d) = self.dist[u] else {
                continue;
            };

            for &edge_id in network.adjacent(u) {
                let edge = &network.edges()[edge_id];
                if edge.residual_capacity() == Flow::zero() {
                    continue;
                }

                let new_dist = d + edge.cost;
                if self.dist[edge.to].is_some_and(|current| current <= new_dist) {
                    continue;
                }
                self.dist[edge.to] = Some(new_dist);
                self.prev[edge.to] = Some(edge_id);
                self.path_length[edge.to] = self.path_length[u] + 1;
                if self.path_length[edge.to] >= num_nodes {
                    return Err(FlowError::NegativeCycle { vertex: edge.to });
                }
                if !self.in_queue[edge.to] {
                    self.in_queue[edge.to] = true;
                    self.que.push_back(edge.to);
                }
            }
        }

        Ok(())
    }
}
