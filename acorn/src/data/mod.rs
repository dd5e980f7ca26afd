pub mod errors;
pub mod evidence;
pub mod stats;
pub use crate::data::errors::CompileError::*;
pub use crate::data::errors::*;
pub use crate::data::evidence::*;
pub use crate::data::stats::*;

// aliases
pub use rustc_hash::{FxHashMap, FxHashSet};

pub type HashMap<K, V> = FxHashMap<K, V>;
pub type HashSet<V> = FxHashSet<V>;
