use crate::circuit::*;
use crate::compile::buckets::Buckets;
use crate::data::*;
use crate::factor::Scope;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// a true leaf summed out of its own table at install time
    Leaf,
    Eliminated,
}

/// One elimination step, recorded when `Options::trace` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub var: String,
    pub kind: StepKind,
    pub absorbed: Vec<Scope>,
    pub result: Scope,
    pub entries: usize,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            StepKind::Leaf => "leaf",
            StepKind::Eliminated => "elim",
        };
        write!(
            f,
            "{} {}: [{}] -> {} ({} entries)",
            kind,
            self.var,
            self.absorbed.iter().join("; "),
            self.result,
            self.entries
        )
    }
}

/// A compiled network: the circuit root together with the final bucket set
/// it was read from and the compilation's counters.
#[derive(Debug, Clone)]
pub struct Compiled {
    root: NodeRef,
    buckets: Buckets,
    stats: NodeStats,
    order: Vec<String>,
    steps: Vec<Step>,
    pub(crate) domains: IndexMap<String, Vec<String>>,
}

impl Compiled {
    pub(crate) fn new(
        root: NodeRef,
        buckets: Buckets,
        stats: NodeStats,
        order: Vec<String>,
        steps: Vec<Step>,
        domains: IndexMap<String, Vec<String>>,
    ) -> Self {
        Compiled {
            root,
            buckets,
            stats,
            order,
            steps,
            domains,
        }
    }
    pub fn root(&self) -> &NodeRef {
        &self.root
    }
    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }
    pub fn stats(&self) -> NodeStats {
        self.stats
    }
    pub fn order(&self) -> &[String] {
        &self.order
    }
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
    /// structurally distinct nodes, counting shared sub-circuits once.
    pub fn circuit_size(&self) -> usize {
        circuit_size(&self.root)
    }
    /// entries of the largest factor a step produced, when steps were traced.
    pub fn largest_factor(&self) -> Option<usize> {
        self.steps.iter().map(|s| s.entries).max()
    }
}
