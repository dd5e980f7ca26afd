pub mod buckets;
pub mod compiled;

pub use crate::compile::buckets::*;
pub use crate::compile::compiled::*;

use crate::bayesian_network::{BayesianNetwork, Variable};
use crate::circuit::*;
use crate::data::*;
use crate::factor::*;
use crate::pipeline::Options;
use itertools::Itertools;
use tracing::*;

/// Lifts a probability table into the circuit: each entry becomes
/// `indicator(var = key[0]) * parameter(p)`.
pub fn circuit_factor(f: &mut NodeFactory, table: &Factor<f64>) -> Result<Factor<NodeRef>> {
    let var = match table.scope().vars().first() {
        Some(v) => v.clone(),
        None => return invariant("conditional table over an empty scope"),
    };
    table.map(|key, p| {
        let state = key.join(",");
        let indicator = f.indicator(&var, &key[0]);
        let parameter = f.parameter(&var, &state, *p);
        Ok(f.product(&var, &state, vec![indicator, parameter]))
    })
}

/// The initial factor of `var` over `[var, parents...]`.
pub fn initial_factor(
    f: &mut NodeFactory,
    bn: &BayesianNetwork,
    var: &Variable,
) -> Result<Factor<NodeRef>> {
    circuit_factor(f, &factor_table(bn, var)?)
}

fn position_of(factor: &Factor<NodeRef>, var: &str) -> Result<usize> {
    match factor.scope().position(var) {
        Some(ix) => Ok(ix),
        None => invariant(&format!("bucket `{}` does not mention `{}`", factor.scope(), var)),
    }
}

pub struct Compiler<'a> {
    bn: &'a BayesianNetwork,
    factory: NodeFactory,
    buckets: Buckets,
    options: Options,
    steps: Vec<Step>,
}

impl<'a> Compiler<'a> {
    pub fn new(bn: &'a BayesianNetwork, options: &Options) -> Self {
        Compiler {
            bn,
            factory: NodeFactory::new(),
            buckets: Buckets::new(),
            options: options.clone(),
            steps: vec![],
        }
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    fn record(&mut self, var: &str, kind: StepKind, absorbed: Vec<Scope>, result: &Factor<NodeRef>) {
        if self.options.trace {
            self.steps.push(Step {
                var: var.to_string(),
                kind,
                absorbed,
                result: result.scope().clone(),
                entries: result.len(),
            });
        }
    }

    /// Installs `var`'s factor. A true leaf is summed out on the spot and
    /// folded into its parents' bucket; nothing else mentions it.
    fn install(&mut self, var: &str, table: &Factor<f64>) -> Result<()> {
        let factor = circuit_factor(&mut self.factory, table)?;
        if self.bn.is_true_leaf(var)? {
            let summed = marginalize(&mut self.factory, &factor, 0)?;
            debug!("leaf `{}` folded onto `{}`", var, summed.scope());
            self.record(var, StepKind::Leaf, vec![factor.scope().clone()], &summed);
            self.buckets.install(&mut self.factory, summed)
        } else {
            debug!("installing `{}`", factor.scope());
            self.buckets.install(&mut self.factory, factor)
        }
    }

    /// Joins every bucket mentioning `var` on `var`, sums `var` out of the
    /// product, and puts the result back.
    fn eliminate(&mut self, var: &str) -> Result<()> {
        let span = span!(Level::DEBUG, "eliminate", var = var);
        let _enter = span.enter();

        let mut mentioning = self.buckets.take_mentioning(var).into_iter();
        let mut joined = match mentioning.next() {
            Some(first) => first,
            None => return invariant(&format!("no bucket mentions `{}` at its elimination", var)),
        };
        let mut absorbed = vec![joined.scope().clone()];
        for other in mentioning {
            absorbed.push(other.scope().clone());
            let pa = position_of(&joined, var)?;
            let pb = position_of(&other, var)?;
            joined = join(&mut self.factory, &joined, pa, &other, pb)?;
        }
        let pos = position_of(&joined, var)?;
        let reduced = marginalize(&mut self.factory, &joined, pos)?;
        debug!(
            "eliminated `{}`: [{}] -> `{}`",
            var,
            absorbed.iter().join("; "),
            reduced.scope()
        );
        self.record(var, StepKind::Eliminated, absorbed, &reduced);
        self.buckets.install(&mut self.factory, reduced)
    }

    pub fn compile(mut self, order: &[String]) -> Result<Compiled> {
        self.bn.validate_order(order)?;
        let tables = order
            .iter()
            .map(|v| factor_table(self.bn, self.bn.variable(v)?))
            .collect::<Result<Vec<_>>>()?;

        let span = span!(Level::DEBUG, "compile");
        let _enter = span.enter();
        debug!("elimination order: {}", order.join(", "));

        // all tables go in before the first elimination
        for (var, table) in order.iter().zip(tables.iter()) {
            self.install(var, table)?;
        }
        for var in order {
            if self.bn.is_true_leaf(var)? {
                continue;
            }
            self.eliminate(var)?;
        }
        self.finish(order)
    }

    fn finish(self, order: &[String]) -> Result<Compiled> {
        let left = self
            .buckets
            .names()
            .flat_map(|s| s.vars().iter().cloned())
            .unique()
            .collect_vec();
        if !left.is_empty() {
            return invariant(&format!(
                "variables left un-eliminated: {} (buckets: {})",
                left.join(", "),
                self.buckets
            ));
        }
        if self.buckets.len() != 1 {
            return invariant(&format!(
                "compilation ended with {} buckets: {}",
                self.buckets.len(),
                self.buckets
            ));
        }
        let empty: Key = vec![];
        let root = match self.buckets.iter().next().and_then(|(_, f)| f.get(&empty)) {
            Some(r) => r.clone(),
            None => return invariant("final bucket holds no root"),
        };
        let stats = self.factory.stats();
        debug!("compiled: {}", stats);
        Ok(Compiled::new(
            root,
            self.buckets,
            stats,
            order.to_vec(),
            self.steps,
            self.bn.domains(),
        ))
    }
}

pub fn compile(bn: &BayesianNetwork, order: &[String]) -> Result<Compiled> {
    compile_with(bn, order, &Options::default())
}

pub fn compile_with(bn: &BayesianNetwork, order: &[String], options: &Options) -> Result<Compiled> {
    Compiler::new(bn, options).compile(order)
}
