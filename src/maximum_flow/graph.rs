use crate::error::{FlowError, Result};
use crate::maximum_flow::result::MinCut;
use num_traits::{NumAssign, Signed};
use std::collections::VecDeque;
use std::fmt::Debug;

#[derive(PartialEq, Debug, Clone)]
pub struct FlowEdge<Flow> {
    pub from: usize,
    pub to: usize,
    pub capacity: Flow,
    pub flow: Flow,
    pub reverse_edge_id: usize,
}

impl<Flow> FlowEdge<Flow>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.capacity - self.flow
    }

    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.residual_capacity() == Flow::zero()
    }

    // upper bound only: a reverse arc has capacity 0 and flow in [-forward.capacity, 0]
    #[inline]
    pub fn within_capacity(&self) -> bool {
        self.flow <= self.capacity
    }
}

/// Residual network: a flat edge arena plus per-vertex lists of edge ids.
///
/// `add_edge` stores the forward arc at an even id `e` and its reverse arc at `e + 1`,
/// so `e ^ 1` is always the partner of `e`. Reverse arcs carry negative flow, hence the
/// `Signed` bound on `Flow`:
///
/// ```compile_fail
/// let _ = flow_engine::maximum_flow::graph::FlowNetwork::<u32>::new(2);
/// ```
#[derive(Default, Debug, Clone)]
pub struct FlowNetwork<Flow> {
    num_nodes: usize,
    edges: Vec<FlowEdge<Flow>>,
    adjacency: Vec<Vec<usize>>,
}

impl<Flow> FlowNetwork<Flow>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    pub fn new(num_nodes: usize) -> Self {
        FlowNetwork { num_nodes, edges: Vec::new(), adjacency: vec![Vec::new(); num_nodes] }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of stored arcs, reverse arcs included.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex >= self.num_nodes {
            return Err(FlowError::VertexOutOfRange { vertex, num_nodes: self.num_nodes });
        }
        Ok(())
    }

    // return forward edge index
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Flow) -> Result<usize> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if capacity < Flow::zero() {
            return Err(FlowError::NegativeCapacity { from, to });
        }

        let forward_id = self.edges.len();
        self.edges.push(FlowEdge { from, to, capacity, flow: Flow::zero(), reverse_edge_id: forward_id + 1 });
        self.edges.push(FlowEdge { from: to, to: from, capacity: Flow::zero(), flow: Flow::zero(), reverse_edge_id: forward_id });
        self.adjacency[from].push(forward_id);
        self.adjacency[to].push(forward_id + 1);

        Ok(forward_id)
    }

    pub fn edge(&self, edge_id: usize) -> Option<&FlowEdge<Flow>> {
        self.edges.get(edge_id)
    }

    /// Every stored arc in id order, reverse arcs included.
    #[inline]
    pub fn edges(&self) -> &[FlowEdge<Flow>] {
        &self.edges
    }

    pub fn get_all_edges(&self) -> Vec<FlowEdge<Flow>> {
        self.edges.clone()
    }

    /// The arcs inserted through `add_edge`, with their ids.
    pub fn forward_edges(&self) -> impl Iterator<Item = (usize, &FlowEdge<Flow>)> + '_ {
        self.edges.iter().enumerate().step_by(2)
    }

    pub fn get_adjacent_edges(&self, vertex: usize) -> Result<&[usize]> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    #[inline]
    pub(crate) fn adjacent(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    #[inline]
    pub(crate) fn residual_capacity(&self, edge_id: usize) -> Flow {
        self.edges[edge_id].residual_capacity()
    }

    pub fn reset_flow(&mut self) {
        self.edges.iter_mut().for_each(|e| e.flow = Flow::zero());
    }

    /// Pushes `amount` along `edge_id` and cancels the same amount on its partner.
    pub fn push_flow(&mut self, edge_id: usize, amount: Flow) -> Result<()> {
        let Some(edge) = self.edges.get(edge_id) else {
            return Err(FlowError::EdgeOutOfRange { edge_id, num_edges: self.edges.len() });
        };
        if amount < Flow::zero() || amount > edge.residual_capacity() {
            return Err(FlowError::CapacityExceeded { edge_id });
        }
        self.augment(edge_id, amount);
        Ok(())
    }

    #[inline]
    pub(crate) fn augment(&mut self, edge_id: usize, amount: Flow) {
        debug_assert!(amount <= self.edges[edge_id].residual_capacity());
        let rev = self.edges[edge_id].reverse_edge_id;

        // update flow
        self.edges[edge_id].flow += amount;
        self.edges[rev].flow -= amount;
    }

    /// `0 <= flow <= capacity` on every inserted arc and its partner holds exactly `-flow`.
    pub fn is_feasible(&self) -> bool {
        self.forward_edges().all(|(_, e)| {
            let reverse = &self.edges[e.reverse_edge_id];
            Flow::zero() <= e.flow && e.flow <= e.capacity && reverse.flow == -e.flow
        })
    }

    /// Net flow leaving `source` over the inserted arcs.
    pub fn flow_value(&self, source: usize) -> Flow {
        self.forward_edges().fold(Flow::zero(), |mut flow, (_, edge)| {
            if edge.from == source {
                flow += edge.flow;
            }
            if edge.to == source {
                flow -= edge.flow;
            }
            flow
        })
    }

    /// inflow - outflow at `vertex`; zero for every vertex except source and sink after a solve.
    pub fn excess(&self, vertex: usize) -> Flow {
        self.forward_edges().fold(Flow::zero(), |mut excess, (_, edge)| {
            if edge.to == vertex {
                excess += edge.flow;
            }
            if edge.from == vertex {
                excess -= edge.flow;
            }
            excess
        })
    }

    /// Snapshot of the inserted arcs currently carrying positive flow.
    pub fn flow_edges(&self) -> Vec<FlowEdge<Flow>> {
        self.forward_edges().filter(|(_, e)| e.flow > Flow::zero()).map(|(_, e)| e.clone()).collect()
    }

    /// Vertices reachable from `source` in the residual network versus the rest.
    pub fn minimum_cut(&self, source: usize) -> Result<MinCut> {
        self.check_vertex(source)?;

        let mut visited = vec![false; self.num_nodes];
        let mut que = VecDeque::from([source]);
        visited[source] = true;

        while let Some(u) = que.pop_front() {
            for &edge_id in &self.adjacency[u] {
                let e = &self.edges[edge_id];
                if !visited[e.to] && e.residual_capacity() > Flow::zero() {
                    visited[e.to] = true;
                    que.push_back(e.to);
                }
            }
        }

        let (source_side, sink_side): (Vec<usize>, Vec<usize>) = (0..self.num_nodes).partition(|&u| visited[u]);
        Ok(MinCut { source_side, sink_side })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn add_edge_stores_contiguous_pairs() {
        let mut network = FlowNetwork::new(3);
        assert_eq!(network.add_edge(0, 1, 5), Ok(0));
        assert_eq!(network.add_edge(1, 2, 7), Ok(2));

        let edges = network.edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[1], FlowEdge { from: 1, to: 0, capacity: 0, flow: 0, reverse_edge_id: 0 });
        assert_eq!(edges[2].reverse_edge_id, 3);
        assert_eq!(network.get_adjacent_edges(1).unwrap(), &[1, 2]);
    }

    #[rstest]
    #[case(3, 0)]
    #[case(0, 3)]
    #[case(7, 7)]
    fn add_edge_rejects_out_of_range(#[case] from: usize, #[case] to: usize) {
        let mut network = FlowNetwork::new(3);
        let err = network.add_edge(from, to, 1).unwrap_err();
        assert!(matches!(err, FlowError::VertexOutOfRange { num_nodes: 3, .. }));
        assert_eq!(network.num_edges(), 0);
        assert!(network.adjacency.iter().all(|a| a.is_empty()));
    }

    #[test]
    fn add_edge_rejects_negative_capacity() {
        let mut network = FlowNetwork::<i64>::new(2);
        assert_eq!(network.add_edge(0, 1, -1), Err(FlowError::NegativeCapacity { from: 0, to: 1 }));
    }

    #[test]
    fn push_flow_updates_both_halves() {
        let mut network = FlowNetwork::new(2);
        let e = network.add_edge(0, 1, 10).unwrap();

        network.push_flow(e, 4).unwrap();
        assert_eq!(network.edge(e).unwrap().flow, 4);
        assert_eq!(network.edge(e + 1).unwrap().flow, -4);
        assert_eq!(network.edge(e + 1).unwrap().residual_capacity(), 4);

        // cancel part of it through the reverse arc
        network.push_flow(e + 1, 3).unwrap();
        assert_eq!(network.edge(e).unwrap().flow, 1);
        assert_eq!(network.edge(e + 1).unwrap().flow, -1);
        let (forward, reverse) = (network.edge(e).unwrap(), network.edge(e + 1).unwrap());
        assert_eq!(forward.flow + reverse.flow, 0);
    }

    #[rstest]
    #[case(0, 11)]
    #[case(0, -1)]
    #[case(1, 1)]
    fn push_flow_rejects_overflow(#[case] edge_id: usize, #[case] amount: i32) {
        let mut network = FlowNetwork::new(2);
        network.add_edge(0, 1, 10).unwrap();
        assert_eq!(network.push_flow(edge_id, amount), Err(FlowError::CapacityExceeded { edge_id }));
        assert!(network.edges().iter().all(|e| e.flow == 0));
    }

    #[test]
    fn feasibility_checks_both_halves() {
        let mut network = FlowNetwork::new(2);
        let e = network.add_edge(0, 1, 4_i32).unwrap();
        network.push_flow(e, 4).unwrap();
        assert!(network.is_feasible());
        assert!(network.edges().iter().all(|edge| edge.within_capacity()));

        network.edges[e].flow = -1;
        network.edges[e + 1].flow = 1;
        assert!(network.edges[e].within_capacity());
        assert!(!network.is_feasible());
    }

    fn saturate_single_edge<Flow>(capacity: Flow) -> Flow
    where
        Flow: NumAssign + Signed + Ord + Copy + Debug,
    {
        let mut network = FlowNetwork::new(2);
        let e = network.add_edge(0, 1, capacity).unwrap();
        network.push_flow(e, capacity).unwrap();
        network.push_flow(e + 1, capacity).unwrap();
        network.push_flow(e, capacity).unwrap();
        assert!(network.is_feasible());
        network.edges()[e + 1].flow
    }

    #[test]
    fn signed_types_hold_negative_reverse_flow() {
        assert_eq!(saturate_single_edge(i8::MAX), -i8::MAX);
        assert_eq!(saturate_single_edge(5_i32), -5);
        assert_eq!(saturate_single_edge(1_i128 << 100), -(1_i128 << 100));
    }

    #[test]
    fn push_flow_rejects_unknown_edge() {
        let mut network = FlowNetwork::new(2);
        network.add_edge(0, 1, 10).unwrap();
        assert_eq!(network.push_flow(2, 1), Err(FlowError::EdgeOutOfRange { edge_id: 2, num_edges: 2 }));
    }

    #[test]
    fn reset_flow_zeroes_everything() {
        let mut network = FlowNetwork::new(3);
        let a = network.add_edge(0, 1, 3).unwrap();
        let b = network.add_edge(1, 2, 3).unwrap();
        network.push_flow(a, 2).unwrap();
        network.push_flow(b, 2).unwrap();
        assert_eq!(network.flow_value(0), 2);
        assert_eq!(network.excess(1), 0);
        assert_eq!(network.excess(2), 2);

        network.reset_flow();
        assert!(network.edges().iter().all(|e| e.flow == 0));
        assert!(network.flow_edges().is_empty());
    }

    #[test]
    fn minimum_cut_follows_residual_edges() {
        let mut network = FlowNetwork::new(4);
        let a = network.add_edge(0, 1, 1).unwrap();
        network.add_edge(1, 2, 5).unwrap();
        network.add_edge(3, 0, 5).unwrap();
        network.push_flow(a, 1).unwrap();

        let cut = network.minimum_cut(0).unwrap();
        assert_eq!(cut.source_side, vec![0]);
        assert_eq!(cut.sink_side, vec![1, 2, 3]);
    }
}
