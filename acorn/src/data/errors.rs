use std::fmt;

#[derive(Clone, Eq, Hash, PartialEq, Debug)]
pub enum CompileError {
    /// malformed input: network description, elimination order, or evidence.
    ConfigError(String),
    /// a compiler defect. Never recovered from.
    InvariantViolation(String),
}
impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompileError::*;
        match self {
            ConfigError(s) => write!(f, "configuration error: {}", s),
            InvariantViolation(s) => write!(f, "invariant violation: {}", s),
        }
    }
}
impl std::error::Error for CompileError {}

impl CompileError {
    pub fn is_config(&self) -> bool {
        matches!(self, CompileError::ConfigError(_))
    }
    pub fn is_invariant(&self) -> bool {
        matches!(self, CompileError::InvariantViolation(_))
    }
}

pub type Result<T> = core::result::Result<T, CompileError>;

pub fn config<T>(s: &str) -> Result<T> {
    Err(CompileError::ConfigError(s.to_string()))
}
pub fn invariant<T>(s: &str) -> Result<T> {
    Err(CompileError::InvariantViolation(s.to_string()))
}
