use crate::data::*;
use crate::factor::factor_table;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Allowed drift of a conditional distribution's total from one.
pub const CPT_TOLERANCE: f64 = 1e-6;

/// One discrete variable and its conditional probability table.
///
/// `table` is row-major over `[self, parents[0], parents[1], ...]`: the
/// variable's own state varies slowest, the last parent fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub states: Vec<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    pub table: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NetworkJson {
    variables: Vec<Variable>,
}

#[derive(Debug, Clone, Default)]
pub struct BayesianNetwork {
    variables: IndexMap<String, Variable>,
}

impl BayesianNetwork {
    pub fn new(vars: Vec<Variable>) -> Result<Self> {
        let mut variables: IndexMap<String, Variable> = IndexMap::new();
        for v in vars {
            if v.states.is_empty() {
                return config(&format!("variable `{}` has no states", v.name));
            }
            if !v.states.iter().all_unique() {
                return config(&format!("variable `{}` repeats a state label", v.name));
            }
            if variables.contains_key(&v.name) {
                return config(&format!("variable `{}` is declared twice", v.name));
            }
            variables.insert(v.name.clone(), v);
        }
        for v in variables.values() {
            for p in &v.parents {
                if p == &v.name {
                    return config(&format!("variable `{}` lists itself as a parent", v.name));
                }
                if !variables.contains_key(p) {
                    return config(&format!("variable `{}` has unknown parent `{}`", v.name, p));
                }
            }
            if !v.parents.iter().all_unique() {
                return config(&format!("variable `{}` repeats a parent", v.name));
            }
        }
        let bn = BayesianNetwork { variables };
        bn.reverse_topological_order()?;
        for v in bn.variables.values() {
            bn.check_table(v)?;
        }
        Ok(bn)
    }

    /// Every entry is a probability and each parent assignment's column sums
    /// to one.
    fn check_table(&self, v: &Variable) -> Result<()> {
        let table = factor_table(self, v)?;
        if let Some(p) = table.values().find(|p| !p.is_finite() || **p < 0.0) {
            return config(&format!("table of `{}` holds {}, not a probability", v.name, p));
        }
        let mut columns: IndexMap<&[String], f64> = IndexMap::new();
        for (key, p) in table.iter() {
            *columns.entry(&key[1..]).or_default() += p;
        }
        for (given, mass) in columns {
            if (mass - 1.0).abs() > CPT_TOLERANCE {
                return config(&format!(
                    "table of `{}` sums to {} given [{}], expected 1",
                    v.name,
                    mass,
                    given.join(",")
                ));
            }
        }
        Ok(())
    }

    pub fn from_json(src: &str) -> Result<Self> {
        match serde_json::from_str::<NetworkJson>(src) {
            Ok(j) => BayesianNetwork::new(j.variables),
            Err(e) => config(&format!("could not parse network: {}", e)),
        }
    }

    pub fn to_json(&self) -> String {
        let j = NetworkJson {
            variables: self.variables.values().cloned().collect(),
        };
        serde_json::to_string_pretty(&j).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
    pub fn variables(&self) -> impl Iterator<Item = &String> {
        self.variables.keys()
    }
    pub fn contains(&self, v: &str) -> bool {
        self.variables.contains_key(v)
    }
    pub fn variable(&self, v: &str) -> Result<&Variable> {
        match self.variables.get(v) {
            Some(var) => Ok(var),
            None => config(&format!("unknown variable `{}`", v)),
        }
    }
    pub fn states(&self, v: &str) -> Result<&[String]> {
        Ok(&self.variable(v)?.states)
    }
    pub fn parents(&self, v: &str) -> Result<&[String]> {
        Ok(&self.variable(v)?.parents)
    }
    pub fn children(&self, v: &str) -> Vec<&String> {
        self.variables
            .values()
            .filter(|c| c.parents.iter().any(|p| p == v))
            .map(|c| &c.name)
            .collect()
    }

    /// A variable with parents that is nobody's parent.
    pub fn is_true_leaf(&self, v: &str) -> Result<bool> {
        Ok(!self.parents(v)?.is_empty() && self.children(v).is_empty())
    }

    /// variable name to its ordered state labels.
    pub fn domains(&self) -> IndexMap<String, Vec<String>> {
        self.variables
            .values()
            .map(|v| (v.name.clone(), v.states.clone()))
            .collect()
    }

    /// Children before parents. Ties follow declaration order so the result is
    /// stable.
    pub fn reverse_topological_order(&self) -> Result<Vec<String>> {
        let mut indegree: IndexMap<&str, usize> = self
            .variables
            .values()
            .map(|v| (v.name.as_str(), v.parents.len()))
            .collect();
        let mut queue: VecDeque<&str> = indegree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(v, _)| *v)
            .collect();
        let mut order = vec![];
        while let Some(v) = queue.pop_front() {
            order.push(v.to_string());
            for c in self.children(v) {
                if let Some(d) = indegree.get_mut(c.as_str()) {
                    *d -= 1;
                    if *d == 0 {
                        queue.push_back(c.as_str());
                    }
                }
            }
        }
        if order.len() != self.len() {
            return config("network contains a directed cycle");
        }
        order.reverse();
        Ok(order)
    }

    /// An elimination order must name every variable exactly once.
    pub fn validate_order(&self, order: &[String]) -> Result<()> {
        if self.is_empty() {
            return config("cannot compile an empty network");
        }
        let mut seen: HashSet<&str> = HashSet::default();
        for v in order {
            if !self.contains(v) {
                return config(&format!("elimination order names unknown variable `{}`", v));
            }
            if !seen.insert(v.as_str()) {
                return config(&format!("elimination order repeats variable `{}`", v));
            }
        }
        let missing = self
            .variables()
            .filter(|v| !seen.contains(v.as_str()))
            .join(", ");
        if !missing.is_empty() {
            return config(&format!("elimination order omits: {}", missing));
        }
        Ok(())
    }

    pub fn validate_evidence(&self, evidence: &Evidence) -> Result<()> {
        evidence.validate(|v| self.variables.get(v).map(|var| var.states.as_slice()))
    }
}
