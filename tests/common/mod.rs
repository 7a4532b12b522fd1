#![allow(dead_code)]

use flow_engine::maximum_flow::graph::FlowNetwork;
use flow_engine::minimum_cost_flow::graph::CostFlowNetwork;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// runs `f` with every event down to TRACE written into the returned buffer
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, logs.contents())
}

pub const CLRS_EDGES: [(usize, usize, i64); 10] =
    [(0, 1, 16), (0, 2, 13), (1, 2, 10), (1, 3, 12), (2, 1, 4), (2, 4, 14), (3, 2, 9), (3, 5, 20), (4, 3, 7), (4, 5, 4)];

pub fn network_from(num_nodes: usize, edges: &[(usize, usize, i64)]) -> FlowNetwork<i64> {
    let mut network = FlowNetwork::new(num_nodes);
    for &(from, to, capacity) in edges {
        network.add_edge(from, to, capacity).unwrap();
    }
    network
}

pub fn cost_network_from(num_nodes: usize, edges: &[(usize, usize, i64, i64)]) -> CostFlowNetwork<i64> {
    let mut network = CostFlowNetwork::new(num_nodes);
    for &(from, to, capacity, cost) in edges {
        network.add_edge(from, to, capacity, cost).unwrap();
    }
    network
}

pub fn assert_valid_flow(network: &FlowNetwork<i64>, source: usize, sink: usize) {
    assert!(network.is_feasible());
    for (edge_id, edge) in network.forward_edges() {
        assert!(0 <= edge.flow && edge.flow <= edge.capacity, "edge {edge_id} violates its capacity");
        assert_eq!(edge.flow, -network.edges()[edge.reverse_edge_id].flow, "edge {edge_id} is out of sync with its reverse");
    }
    for u in 0..network.num_nodes() {
        if u != source && u != sink {
            assert_eq!(network.excess(u), 0, "flow is not conserved at {u}");
        }
    }
}
