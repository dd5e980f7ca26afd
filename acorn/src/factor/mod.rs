pub mod ops;
pub mod table;

pub use crate::factor::ops::*;
pub use crate::factor::table::*;

use crate::data::*;
use indexmap::map::Iter;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;

/// A joint assignment: one state label per variable of a scope, positionally.
pub type Key = Vec<String>;

/// The ordered variable-set of a factor. Doubles as a bucket's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Scope(Vec<String>);

impl Scope {
    pub fn new(vars: Vec<String>) -> Self {
        Scope(vars)
    }
    pub fn empty() -> Self {
        Scope(vec![])
    }
    pub fn vars(&self) -> &[String] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, v: &str) -> bool {
        self.0.iter().any(|x| x == v)
    }
    pub fn position(&self, v: &str) -> Option<usize> {
        self.0.iter().position(|x| x == v)
    }
    /// the scope with the variable at `ix` dropped.
    pub fn without(&self, ix: usize) -> Scope {
        let mut vars = self.0.clone();
        vars.remove(ix);
        Scope(vars)
    }
    /// same variables, in any order.
    pub fn same_set(&self, o: &Scope) -> bool {
        self.len() == o.len() && self.0.iter().all(|v| o.contains(v))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{{}}")
        } else {
            write!(f, "{}", self.0.join(","))
        }
    }
}

/// A table from joint assignments over `scope` to payloads: raw
/// probabilities while building CPTs, circuit nodes once compiling.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor<T> {
    scope: Scope,
    entries: IndexMap<Key, T>,
}

impl<T> Factor<T> {
    pub fn new(scope: Scope) -> Self {
        Factor {
            scope,
            entries: IndexMap::new(),
        }
    }
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn get(&self, key: &[String]) -> Option<&T> {
        self.entries.get(key)
    }
    pub fn contains_key(&self, key: &[String]) -> bool {
        self.entries.contains_key(key)
    }
    pub fn iter(&self) -> Iter<'_, Key, T> {
        self.entries.iter()
    }
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Inserts an entry, returning the payload it replaced. Keys must have
    /// one component per scope variable.
    pub fn insert(&mut self, key: Key, val: T) -> Result<Option<T>> {
        if key.len() != self.scope.len() {
            return invariant(&format!(
                "key [{}] has {} components but factor `{}` has {} variables",
                key.join(","),
                key.len(),
                self.scope,
                self.scope.len()
            ));
        }
        Ok(self.entries.insert(key, val))
    }

    /// A copy with every payload mapped through `f`.
    pub fn map<U, F: FnMut(&Key, &T) -> Result<U>>(&self, mut f: F) -> Result<Factor<U>> {
        let mut out = Factor::new(self.scope.clone());
        for (k, v) in self.iter() {
            out.insert(k.clone(), f(k, v)?)?;
        }
        Ok(out)
    }
}

impl<T> IntoIterator for Factor<T> {
    type Item = (Key, T);
    type IntoIter = indexmap::map::IntoIter<Key, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Factor<f64> {
    pub fn mass(&self) -> f64 {
        self.values().sum()
    }
}

impl fmt::Display for Factor<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.scope)?;
        for (k, p) in self.iter() {
            writeln!(f, "  {} : {}", k.iter().join(","), p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_checks_key_length() {
        let mut f = Factor::new(Scope::new(vec!["A".to_string(), "B".to_string()]));
        assert!(f.insert(vec!["0".to_string()], 0.5).unwrap_err().is_invariant());
        assert_eq!(f.insert(vec!["0".to_string(), "1".to_string()], 0.5), Ok(None));
        assert_eq!(
            f.insert(vec!["0".to_string(), "1".to_string()], 0.25),
            Ok(Some(0.5))
        );
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_scope_helpers() {
        let s = Scope::new(vec!["B".to_string(), "A".to_string(), "C".to_string()]);
        assert_eq!(s.position("A"), Some(1));
        assert_eq!(format!("{}", s.without(1)), "B,C");
        assert!(s.same_set(&Scope::new(vec![
            "A".to_string(),
            "C".to_string(),
            "B".to_string()
        ])));
        assert_eq!(format!("{}", Scope::empty()), "{}");
    }
}
