use crate::error::{FlowError, Result};
use num_traits::{NumAssign, Signed};
use std::fmt::Debug;

#[derive(PartialEq, Debug, Clone)]
pub struct CostFlowEdge<Flow> {
    pub from: usize,
    pub to: usize,
    pub capacity: Flow,
    pub flow: Flow,
    pub cost: Flow,
    pub reverse_edge_id: usize,
}

impl<Flow> CostFlowEdge<Flow>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.capacity - self.flow
    }
}

/// Same paired layout as [`crate::maximum_flow::graph::FlowNetwork`]; the reverse arc of an edge
/// with cost `c` carries cost `-c`, so cancelling flow refunds its cost.
#[derive(Default, Debug, Clone)]
pub struct CostFlowNetwork<Flow> {
    num_nodes: usize,
    edges: Vec<CostFlowEdge<Flow>>,
    adjacency: Vec<Vec<usize>>,
}

impl<Flow> CostFlowNetwork<Flow>
where
    Flow: NumAssign + Signed + Ord + Copy + Debug,
{
    pub fn new(num_nodes: usize) -> Self {
        CostFlowNetwork { num_nodes, edges: Vec::new(), adjacency: vec![Vec::new(); num_nodes] }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

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

    // return forward edge index; the reverse edge is index + 1
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Flow, cost: Flow) -> Result<usize> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if capacity < Flow::zero() {
            return Err(FlowError::NegativeCapacity { from, to });
        }

        let forward_id = self.edges.len();
        self.edges.push(CostFlowEdge { from, to, capacity, flow: Flow::zero(), cost, reverse_edge_id: forward_id + 1 });
        self.edges.push(CostFlowEdge { from: to, to: from, capacity: Flow::zero(), flow: Flow::zero(), cost: -cost, reverse_edge_id: forward_id });
        self.adjacency[from].push(forward_id);
        self.adjacency[to].push(forward_id + 1);

        Ok(forward_id)
    }

    pub fn edge(&self, edge_id: usize) -> Option<&CostFlowEdge<Flow>> {
        self.edges.get(edge_id)
    }

    #[inline]
    pub fn edges(&self) -> &[CostFlowEdge<Flow>] {
        &self.edges
    }

    pub fn forward_edges(&self) -> impl Iterator<Item = (usize, &CostFlowEdge<Flow>)> + '_ {
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

    pub fn reset_flow(&mut self) {
        self.edges.iter_mut().for_each(|e| e.flow = Flow::zero());
    }

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
        self.edges[edge_id].flow += amount;
        self.edges[rev].flow -= amount;
    }

    pub fn flow_edges(&self) -> Vec<CostFlowEdge<Flow>> {
        self.forward_edges().filter(|(_, e)| e.flow > Flow::zero()).map(|(_, e)| e.clone()).collect()
    }

    /// sum of flow * cost over the inserted arcs
    pub fn total_cost(&self) -> Flow {
        self.forward_edges().fold(Flow::zero(), |cost, (_, edge)| cost + edge.cost * edge.flow)
    }

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
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reverse_edge_negates_cost() {
        let mut network = CostFlowNetwork::new(2);
        let e = network.add_edge(0, 1, 4, 3).unwrap();
        let reverse = network.edge(e + 1).unwrap();
        assert_eq!(reverse.cost, -3);
        assert_eq!(reverse.capacity, 0);
        assert_eq!(reverse.reverse_edge_id, e);
    }

    #[test]
    fn push_flow_keeps_pair_in_sync() {
        let mut network = CostFlowNetwork::new(3);
        let a = network.add_edge(0, 1, 4, 3).unwrap();
        let b = network.add_edge(1, 2, 4, -1).unwrap();
        network.push_flow(a, 2).unwrap();
        network.push_flow(b, 2).unwrap();
        assert_eq!(network.total_cost(), 4);
        assert_eq!(network.excess(1), 0);

        network.push_flow(b + 1, 1).unwrap();
        assert_eq!(network.edge(b).unwrap().flow, 1);
        assert_eq!(network.edge(b + 1).unwrap().flow, -1);
        assert_eq!(network.push_flow(a, 3), Err(FlowError::CapacityExceeded { edge_id: a }));

        network.reset_flow();
        assert_eq!(network.total_cost(), 0);
        assert!(network.flow_edges().is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        let mut network = CostFlowNetwork::<i64>::new(2);
        assert_eq!(network.add_edge(0, 2, 1, 1), Err(FlowError::VertexOutOfRange { vertex: 2, num_nodes: 2 }));
        assert_eq!(network.add_edge(1, 0, -1, 1), Err(FlowError::NegativeCapacity { from: 1, to: 0 }));
        assert_eq!(network.num_edges(), 0);
    }
}
