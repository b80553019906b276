//! Rich diagnostic error types for dinebot.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives
//! so users get an error code and a hint on how to fix the problem. The NLU
//! core itself never fails: unmatched text degrades to "no match".

use miette::Diagnostic;
use thiserror::Error;

pub use crate::config::{ConfigError, ConfigResult};
pub use crate::data::{DataError, DataResult};

/// Top-level error type.
///
/// Each variant wraps a subsystem error, preserving its diagnostic code and
/// help text.
#[derive(Debug, Error, Diagnostic)]
pub enum DinebotError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Data(#[from] DataError),
}

pub type DinebotResult<T> = std::result::Result<T, DinebotError>;
