pub mod eval;
pub mod factory;
pub mod node;

pub use crate::circuit::eval::*;
pub use crate::circuit::factory::*;
pub use crate::circuit::node::*;
