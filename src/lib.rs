pub mod error;
pub mod maximum_flow;
pub mod minimum_cost_flow;

pub use error::{FlowError, Result};
