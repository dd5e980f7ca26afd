use crate::circuit::*;
use crate::data::*;
use crate::factor::*;
use indexmap::map::Iter;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;
use tracing::*;

/// The live state of bucket elimination: factors of circuit nodes keyed by
/// the variable-set they range over. No two buckets hold the same set.
#[derive(Debug, Clone, Default)]
pub struct Buckets(IndexMap<Scope, Factor<NodeRef>>);

impl Buckets {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, scope: &Scope) -> Option<&Factor<NodeRef>> {
        self.0.get(scope)
    }
    pub fn names(&self) -> impl Iterator<Item = &Scope> {
        self.0.keys()
    }
    pub fn iter(&self) -> Iter<'_, Scope, Factor<NodeRef>> {
        self.0.iter()
    }
    pub fn mentions(&self, var: &str) -> bool {
        self.0.keys().any(|s| s.contains(var))
    }

    /// Adds `factor` as a bucket, or multiplies it into the bucket already
    /// ranging over the same variables (that bucket keeps its name).
    pub fn install(&mut self, f: &mut NodeFactory, factor: Factor<NodeRef>) -> Result<()> {
        let existing = self.0.keys().position(|s| s.same_set(factor.scope()));
        match existing {
            None => {
                trace!("new bucket `{}`", factor.scope());
                self.0.insert(factor.scope().clone(), factor);
            }
            Some(ix) => {
                if let Some((name, slot)) = self.0.get_index_mut(ix) {
                    debug!("merging `{}` into bucket `{}`", factor.scope(), name);
                    *slot = multiply(f, slot, &factor)?;
                }
            }
        }
        Ok(())
    }

    /// Removes and returns every bucket mentioning `var`, the one headed by
    /// `var` (its own conditional table, if still separate) first.
    pub fn take_mentioning(&mut self, var: &str) -> Vec<Factor<NodeRef>> {
        let names = self
            .0
            .keys()
            .filter(|s| s.contains(var))
            .cloned()
            .sorted_by_key(|s| s.position(var) != Some(0))
            .collect_vec();
        names
            .iter()
            .filter_map(|s| self.0.shift_remove(s))
            .collect_vec()
    }
}

impl fmt::Display for Buckets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.0
                .iter()
                .map(|(s, fac)| format!("{}: {}", s, fac.len()))
                .join("; ")
        )
    }
}
