//! Error types for transformations

use thiserror::Error;

/// Errors raised by a macro while executing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacroError {
    /// A parameter is missing or has an unusable value
    #[error("Invalid parameter [{name}]: {message}")]
    InvalidParameter { name: String, message: String },

    /// The macro was called inline but only supports standalone calls
    #[error("Macro cannot be used inline")]
    InlineNotSupported,

    /// The macro expects content and got none
    #[error("Missing macro content")]
    MissingContent,

    #[error("Macro execution failed: {0}")]
    Execution(String),
}

/// Errors raised while transforming a tree
#[derive(Debug, Error)]
pub enum TransformationError {
    /// A macro call could not be expanded
    #[error("Failed to execute macro [{id}]: {source}")]
    Macro {
        id: String,
        #[source]
        source: MacroError,
    },

    /// A pass failed with a free-form message
    #[error("{0}")]
    Failed(String),

    /// A pass of a manager failed; later passes were not run
    #[error("Transformation [{name}] failed: {source}")]
    Pass {
        name: String,
        #[source]
        source: Box<TransformationError>,
    },
}

impl TransformationError {
    /// Name of the failing pass, when raised by a manager
    pub fn pass_name(&self) -> Option<&str> {
        match self {
            TransformationError::Pass { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Result type for transformations
pub type Result<T> = std::result::Result<T, TransformationError>;
