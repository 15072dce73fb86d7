//! Error types for pipeline and strategy construction.
//!
//! The round-trip itself has no fatal errors: malformed placeholder syntax
//! declines to ordinary text and unresolvable indices degrade to literal
//! reproduction. Errors only arise when wiring a pipeline or strategy set
//! from caller-supplied names.

use std::fmt;

/// Errors that can occur while assembling a pipeline or strategy set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule name given as an insertion anchor is not registered.
    UnknownRule(String),
    /// A strategy name has no built-in implementation.
    UnknownStrategy(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownRule(name) => write!(f, "Rule '{name}' not found in pipeline"),
            Error::UnknownStrategy(name) => write!(f, "Strategy '{name}' is not known"),
        }
    }
}

impl std::error::Error for Error {}
