use crate::circuit::*;
use crate::data::*;
use crate::factor::{Factor, Key, Scope};
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::*;

/// Sums the variable at `position` out of `factor`: one sum node per reduced
/// key, whose children are the nodes of every entry that reduces to it.
pub fn marginalize(
    f: &mut NodeFactory,
    factor: &Factor<NodeRef>,
    position: usize,
) -> Result<Factor<NodeRef>> {
    let scope = factor.scope();
    if position >= scope.len() {
        return invariant(&format!(
            "cannot marginalize position {} of factor `{}`",
            position, scope
        ));
    }
    let var = &scope.vars()[position];
    let reduced_scope = scope.without(position);
    let mut groups: IndexMap<Key, Vec<NodeRef>> = IndexMap::new();
    for (key, node) in factor.iter() {
        if key.len() != scope.len() {
            return invariant(&format!(
                "key [{}] does not fit factor `{}`",
                key.join(","),
                scope
            ));
        }
        let mut reduced = key.clone();
        reduced.remove(position);
        groups.entry(reduced).or_default().push(node.clone());
    }
    let mut out = Factor::new(reduced_scope);
    for (reduced, children) in groups {
        let sum = f.sum(var, &reduced.join(","), children);
        out.insert(reduced, sum)?;
    }
    trace!("marginalized `{}` out of `{}` -> `{}`", var, scope, out.scope());
    Ok(out)
}

/// Equi-join of `a` and `b` on the variable at `pos_a` in `a` and `pos_b` in
/// `b`. Output keys are `a`'s key followed by `b`'s key without `pos_b`; any
/// other variable the two scopes share is matched as well and kept once.
pub fn join(
    f: &mut NodeFactory,
    a: &Factor<NodeRef>,
    pos_a: usize,
    b: &Factor<NodeRef>,
    pos_b: usize,
) -> Result<Factor<NodeRef>> {
    let (sa, sb) = (a.scope(), b.scope());
    if pos_a >= sa.len() || pos_b >= sb.len() {
        return invariant(&format!(
            "join positions ({}, {}) out of range for `{}` and `{}`",
            pos_a, pos_b, sa, sb
        ));
    }
    let pivot = &sa.vars()[pos_a];
    if pivot != &sb.vars()[pos_b] {
        return invariant(&format!(
            "join pivots differ: `{}` in `{}` against `{}` in `{}`",
            pivot,
            sa,
            sb.vars()[pos_b],
            sb
        ));
    }
    if sa == sb {
        elementwise(f, a, b)
    } else {
        natural_join(f, a, b, pivot)
    }
}

/// Product of two factors over any scopes, matching on every shared
/// variable. Used to merge buckets that land on the same variable-set.
pub fn multiply(
    f: &mut NodeFactory,
    a: &Factor<NodeRef>,
    b: &Factor<NodeRef>,
) -> Result<Factor<NodeRef>> {
    if a.scope() == b.scope() {
        elementwise(f, a, b)
    } else {
        let label = format!("{}", b.scope());
        natural_join(f, a, b, &label)
    }
}

fn elementwise(
    f: &mut NodeFactory,
    a: &Factor<NodeRef>,
    b: &Factor<NodeRef>,
) -> Result<Factor<NodeRef>> {
    if a.len() != b.len() {
        return invariant(&format!(
            "element-wise join of `{}` with {} and {} entries",
            a.scope(),
            a.len(),
            b.len()
        ));
    }
    let var = format!("{}", a.scope());
    let mut out = Factor::new(a.scope().clone());
    for (key, na) in a.iter() {
        let nb = match b.get(key) {
            Some(nb) => nb,
            None => {
                return invariant(&format!(
                    "element-wise join of `{}`: no entry [{}] on the right",
                    a.scope(),
                    key.join(",")
                ))
            }
        };
        let prod = f.product(&var, &key.join(","), vec![na.clone(), nb.clone()]);
        out.insert(key.clone(), prod)?;
    }
    Ok(out)
}

fn natural_join(
    f: &mut NodeFactory,
    a: &Factor<NodeRef>,
    b: &Factor<NodeRef>,
    label: &str,
) -> Result<Factor<NodeRef>> {
    let (sa, sb) = (a.scope(), b.scope());
    // (position in a, position in b) of every shared variable
    let shared = sb
        .vars()
        .iter()
        .enumerate()
        .filter_map(|(ib, v)| sa.position(v).map(|ia| (ia, ib)))
        .collect_vec();
    let b_only = (0..sb.len())
        .filter(|ib| !shared.iter().any(|(_, j)| j == ib))
        .collect_vec();
    let scope = Scope::new(
        sa.vars()
            .iter()
            .chain(b_only.iter().map(|ib| &sb.vars()[*ib]))
            .cloned()
            .collect_vec(),
    );

    let mut index: HashMap<Vec<&str>, Vec<(&Key, &NodeRef)>> = HashMap::default();
    for (kb, nb) in b.iter() {
        if kb.len() != sb.len() {
            return invariant(&format!("key [{}] does not fit factor `{}`", kb.join(","), sb));
        }
        let on = shared.iter().map(|(_, ib)| kb[*ib].as_str()).collect_vec();
        index.entry(on).or_default().push((kb, nb));
    }

    let mut out = Factor::new(scope);
    for (ka, na) in a.iter() {
        if ka.len() != sa.len() {
            return invariant(&format!("key [{}] does not fit factor `{}`", ka.join(","), sa));
        }
        let on = shared.iter().map(|(ia, _)| ka[*ia].as_str()).collect_vec();
        let matches = match index.get(&on) {
            Some(ms) => ms,
            None => continue,
        };
        for (kb, nb) in matches {
            let key = ka
                .iter()
                .chain(b_only.iter().map(|ib| &kb[*ib]))
                .cloned()
                .collect_vec();
            let state = key.join(",");
            let prod = f.product(label, &state, vec![na.clone(), (*nb).clone()]);
            if out.insert(key, prod)?.is_some() {
                return invariant(&format!(
                    "joining `{}` with `{}` produced key [{}] twice",
                    sa, sb, state
                ));
            }
        }
    }
    if out.is_empty() {
        return invariant(&format!(
            "joining `{}` with `{}` on `{}` matched no entries",
            sa, sb, label
        ));
    }
    debug!("joined `{}` x `{}` -> `{}` ({} entries)", sa, sb, out.scope(), out.len());
    Ok(out)
}

/// The numeric value of every entry under `evidence`.
pub fn evaluated(factor: &Factor<NodeRef>, evidence: Option<&Evidence>) -> Result<Factor<f64>> {
    factor.map(|_, n| Ok(evaluate(n, evidence)))
}
