use crate::bayesian_network::{BayesianNetwork, Variable};
use crate::data::*;
use crate::factor::{Factor, Key, Scope};
use itertools::Itertools;

/// Every assignment of `domains`, first domain varying slowest.
pub fn assignments(domains: &[&[String]]) -> Vec<Key> {
    domains
        .iter()
        .map(|d| d.iter().cloned())
        .multi_cartesian_product()
        .collect_vec()
}

/// Lays a variable's flat CPT out as a factor over `[var, parents...]`.
pub fn factor_table(bn: &BayesianNetwork, var: &Variable) -> Result<Factor<f64>> {
    let mut domains: Vec<&[String]> = vec![&var.states];
    for p in &var.parents {
        domains.push(bn.states(p)?);
    }
    let size: usize = domains.iter().map(|d| d.len()).product();
    if size != var.table.len() {
        return config(&format!(
            "conditional probability table of `{}` has {} entries, expected {} ({})",
            var.name,
            var.table.len(),
            size,
            domains.iter().map(|d| d.len()).join(" x ")
        ));
    }
    let scope = Scope::new(
        std::iter::once(var.name.clone())
            .chain(var.parents.iter().cloned())
            .collect_vec(),
    );
    let mut factor = Factor::new(scope);
    for (key, p) in assignments(&domains).into_iter().zip(var.table.iter()) {
        factor.insert(key, *p)?;
    }
    Ok(factor)
}
