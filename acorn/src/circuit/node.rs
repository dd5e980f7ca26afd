use std::fmt;
use std::sync::Arc;

/// Sub-circuits are shared, never copied.
pub type NodeRef = Arc<Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// gates `(var, state)` against evidence; implicitly 1.
    Indicator,
    Parameter(f64),
    Product(Vec<NodeRef>),
    Sum(Vec<NodeRef>),
}

/// An arithmetic circuit node. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub var: String,
    pub state: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn children(&self) -> &[NodeRef] {
        match &self.kind {
            NodeKind::Product(cs) | NodeKind::Sum(cs) => cs,
            _ => &[],
        }
    }
    /// identity of a shared node, stable for the node's lifetime.
    pub fn id(node: &NodeRef) -> usize {
        Arc::as_ptr(node) as usize
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Indicator => write!(f, "λ[{}={}]", self.var, self.state),
            NodeKind::Parameter(p) => write!(f, "θ[{}|{}]={}", self.var, self.state, p),
            NodeKind::Product(cs) => write!(f, "*[{}:{}]({})", self.var, self.state, cs.len()),
            NodeKind::Sum(cs) => write!(f, "+[{}:{}]({})", self.var, self.state, cs.len()),
        }
    }
}
