use crate::circuit::node::*;
use crate::data::*;

/// Value of the circuit rooted at `node`. Indicators are open unless the
/// evidence pins their variable to another state.
pub fn evaluate(node: &Node, evidence: Option<&Evidence>) -> f64 {
    match &node.kind {
        NodeKind::Parameter(p) => *p,
        NodeKind::Sum(cs) => cs.iter().map(|c| evaluate(c, evidence)).sum(),
        NodeKind::Product(cs) => cs.iter().map(|c| evaluate(c, evidence)).product(),
        NodeKind::Indicator => match evidence {
            None => 1.0,
            Some(e) if e.admits(&node.var, &node.state) => 1.0,
            Some(_) => 0.0,
        },
    }
}

/// Evaluates shared sub-circuits once per evidence set. Results agree with
/// [`evaluate`]; only the amount of work differs.
pub struct Evaluator<'e> {
    evidence: Option<&'e Evidence>,
    cache: HashMap<usize, f64>,
}

impl<'e> Evaluator<'e> {
    pub fn new(evidence: Option<&'e Evidence>) -> Self {
        Evaluator {
            evidence,
            cache: Default::default(),
        }
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn eval(&mut self, node: &NodeRef) -> f64 {
        let id = Node::id(node);
        if let Some(v) = self.cache.get(&id) {
            return *v;
        }
        let v = match &node.kind {
            NodeKind::Sum(cs) => cs.iter().map(|c| self.eval(c)).sum(),
            NodeKind::Product(cs) => cs.iter().map(|c| self.eval(c)).product(),
            _ => evaluate(node, self.evidence),
        };
        self.cache.insert(id, v);
        v
    }
}

/// Number of structurally distinct nodes reachable from `root`.
pub fn circuit_size(root: &NodeRef) -> usize {
    let mut seen: HashSet<usize> = HashSet::default();
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        if seen.insert(Node::id(n)) {
            stack.extend(n.children());
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::factory::NodeFactory;

    // P(A) as λa0·θa0 + λa1·θa1
    fn root_a(f: &mut NodeFactory) -> NodeRef {
        let i0 = f.indicator("A", "0");
        let p0 = f.parameter("A", "0", 0.6);
        let i1 = f.indicator("A", "1");
        let p1 = f.parameter("A", "1", 0.4);
        let l = f.product("A", "0", vec![i0, p0]);
        let r = f.product("A", "1", vec![i1, p1]);
        f.sum("A", "", vec![l, r])
    }

    #[test]
    fn test_indicator_gating() {
        let mut f = NodeFactory::new();
        let root = root_a(&mut f);
        assert!((evaluate(&root, None) - 1.0).abs() < 1e-12);
        let e = Evidence::empty().pin("A", "1");
        assert!((evaluate(&root, Some(&e)) - 0.4).abs() < 1e-12);
        let e = Evidence::empty().pin("B", "1");
        assert!((evaluate(&root, Some(&e)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_memoized_agrees_and_shares() {
        let mut f = NodeFactory::new();
        let a = root_a(&mut f);
        let twice = f.product("X", "", vec![a.clone(), a.clone()]);
        let e = Evidence::empty().pin("A", "0");
        let mut ev = Evaluator::new(Some(&e));
        assert_eq!(ev.eval(&twice), evaluate(&twice, Some(&e)));
        assert_eq!(ev.cached(), circuit_size(&twice));
        assert_eq!(circuit_size(&twice), 8);
    }

    #[test]
    fn test_child_order_is_irrelevant() {
        let mut f = NodeFactory::new();
        let a = root_a(&mut f);
        let mut cs = a.children().to_vec();
        cs.reverse();
        let flipped = f.sum("A", "", cs);
        let e = Evidence::empty().pin("A", "0");
        assert!((evaluate(&a, Some(&e)) - evaluate(&flipped, Some(&e))).abs() < 1e-9);
    }
}
