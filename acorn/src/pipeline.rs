use crate::bayesian_network::BayesianNetwork;
use crate::compile::{compile_with, Compiled};
use crate::data::*;
use tracing::*;

#[derive(Default, Debug, Clone)]
pub struct Options {
    /// record every elimination step on the compiled output
    pub trace: bool,
}
impl Options {
    pub fn new(trace: bool) -> Self {
        Self { trace }
    }
    pub fn traced() -> Self {
        Self { trace: true }
    }
}

/// Compiles `bn` under `order`, or children-before-parents when none is given.
pub fn run_network(
    bn: &BayesianNetwork,
    order: Option<&[String]>,
    opt: &Options,
) -> Result<Compiled> {
    let order = match order {
        Some(o) => o.to_vec(),
        None => bn.reverse_topological_order()?,
    };
    debug!("compiling {} variables, options: {:?}", bn.len(), opt);
    compile_with(bn, &order, opt)
}

/// Parses a JSON network description and compiles it.
pub fn run(src: &str) -> Result<Compiled> {
    run_with(src, None, &Options::default())
}

pub fn run_with(src: &str, order: Option<&[String]>, opt: &Options) -> Result<Compiled> {
    let bn = BayesianNetwork::from_json(src)?;
    run_network(&bn, order, opt)
}
