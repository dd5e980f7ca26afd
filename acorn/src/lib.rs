#![allow(clippy::type_complexity)]
#![allow(clippy::len_without_is_empty)]

// core types
pub mod data;
pub use data::*;

pub mod bayesian_network;
pub use bayesian_network::{BayesianNetwork, Variable};

pub mod factor;

pub mod circuit;

// the compiler
pub mod compile;
pub use compile::{compile, compile_with, Compiled};

pub mod pipeline;
pub use pipeline::*;

pub mod inference;

// extras
pub mod utils;

#[cfg(test)]
mod tests;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
