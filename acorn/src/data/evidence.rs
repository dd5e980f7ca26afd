use crate::data::errors::*;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// A conjunctive partial assignment: each pinned variable is observed in
/// exactly one state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence(IndexMap<String, String>);

impl Evidence {
    pub fn empty() -> Self {
        Default::default()
    }
    /// pinning a variable twice keeps the latest state.
    pub fn pin(mut self, var: &str, state: &str) -> Self {
        self.insert(var, state);
        self
    }
    pub fn insert(&mut self, var: &str, state: &str) {
        self.0.insert(var.to_string(), state.to_string());
    }
    pub fn get(&self, var: &str) -> Option<&str> {
        self.0.get(var).map(String::as_str)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(v, s)| (v.as_str(), s.as_str()))
    }

    /// Gate for an indicator on `(var, state)`: open unless `var` is pinned
    /// to some other state.
    pub fn admits(&self, var: &str, state: &str) -> bool {
        match self.0.get(var) {
            None => true,
            Some(s) => s == state,
        }
    }

    /// Checks every pin against `states_of`, which maps a variable to its
    /// state labels (or `None` when the variable is unknown).
    pub fn validate<'a, F>(&self, states_of: F) -> Result<()>
    where
        F: Fn(&str) -> Option<&'a [String]>,
    {
        for (v, s) in self.iter() {
            let states = match states_of(v) {
                Some(states) => states,
                None => return config(&format!("evidence names unknown variable `{}`", v)),
            };
            if !states.iter().any(|x| x == s) {
                return config(&format!(
                    "evidence pins `{}` to unknown state `{}` (expected one of: {})",
                    v,
                    s,
                    states.join(", ")
                ));
            }
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Evidence {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut e = Evidence::empty();
        for (v, s) in iter {
            e.insert(v, s);
        }
        e
    }
}

/// Parses `B=0|A=1` (pairs may also be separated by commas).
impl FromStr for Evidence {
    type Err = CompileError;
    fn from_str(src: &str) -> Result<Self> {
        let mut e = Evidence::empty();
        for item in src.split(['|', ',']) {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            match item.split_once('=') {
                Some((v, s)) if !v.trim().is_empty() && !s.trim().is_empty() => {
                    e.insert(v.trim(), s.trim())
                }
                _ => return config(&format!("malformed evidence item `{}` in `{}`", item, src)),
            }
        }
        Ok(e)
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }
        write!(
            f,
            "{}",
            self.iter().map(|(v, s)| format!("{}={}", v, s)).join("|")
        )
    }
}
