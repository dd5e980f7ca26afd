pub mod exact;
pub use crate::inference::exact::*;

use crate::bayesian_network::BayesianNetwork;
use crate::data::*;
use crate::pipeline::{run_network, Options};

/// One-shot Pr(evidence): compiles under the default order, then queries.
pub fn probability(bn: &BayesianNetwork, evidence: &Evidence) -> Result<f64> {
    run_network(bn, None, &Options::default())?.probability(evidence)
}

/// One-shot posterior of `var` given `evidence`.
pub fn posterior(bn: &BayesianNetwork, var: &str, evidence: &Evidence) -> Result<Marginal> {
    run_network(bn, None, &Options::default())?.marginal(var, evidence)
}
