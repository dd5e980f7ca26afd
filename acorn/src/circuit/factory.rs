use crate::circuit::node::*;
use crate::data::*;
use std::sync::Arc;
use tracing::*;

/// The compilation context: every circuit node is minted here so that the
/// counters and the indicator de-duplication set stay with one compilation.
#[derive(Debug, Clone, Default)]
pub struct NodeFactory {
    stats: NodeStats,
    seen_indicators: HashSet<(String, String)>,
}

impl NodeFactory {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn stats(&self) -> NodeStats {
        self.stats
    }

    pub fn create(&mut self, kind: NodeKind, var: &str, state: &str) -> NodeRef {
        self.stats.total += 1;
        match &kind {
            NodeKind::Sum(_) => self.stats.sum += 1,
            NodeKind::Product(_) => self.stats.product += 1,
            NodeKind::Parameter(_) => self.stats.parameter += 1,
            NodeKind::Indicator => {
                self.stats.indicator += 1;
                if !self
                    .seen_indicators
                    .insert((var.to_string(), state.to_string()))
                {
                    trace!("duplicate indicator {}={}", var, state);
                    self.stats.total -= 1;
                    self.stats.indicator -= 1;
                }
            }
        }
        Arc::new(Node {
            var: var.to_string(),
            state: state.to_string(),
            kind,
        })
    }

    pub fn indicator(&mut self, var: &str, state: &str) -> NodeRef {
        self.create(NodeKind::Indicator, var, state)
    }
    pub fn parameter(&mut self, var: &str, state: &str, p: f64) -> NodeRef {
        self.create(NodeKind::Parameter(p), var, state)
    }
    pub fn product(&mut self, var: &str, state: &str, children: Vec<NodeRef>) -> NodeRef {
        self.create(NodeKind::Product(children), var, state)
    }
    pub fn sum(&mut self, var: &str, state: &str, children: Vec<NodeRef>) -> NodeRef {
        self.create(NodeKind::Sum(children), var, state)
    }
}
