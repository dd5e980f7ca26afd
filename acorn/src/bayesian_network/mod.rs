pub mod diagnostics;
pub mod network;

pub use crate::bayesian_network::diagnostics::*;
pub use crate::bayesian_network::network::*;
