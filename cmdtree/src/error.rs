//! Error taxonomy for declaration, binding, and routing.
//!
//! Every failure is returned as a typed [`Error`] up the call chain; only the
//! outermost entry points (`run`/`run_from`) print and pick an exit code, so
//! the binder and router stay testable without process termination.

use thiserror::Error;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while declaring a tree, binding tokens, or routing.
#[derive(Debug, Error)]
pub enum Error {
    /// A required option had no match in the token sequence.
    #[error("option '{option}' is required")]
    MissingRequiredOption { option: String },

    /// A converter rejected a raw token.
    #[error("invalid value '{raw}' for '{param}': {reason}")]
    MalformedValue {
        param: String,
        raw: String,
        reason: String,
    },

    /// An option-like token sat in a positional slot.
    #[error("found option-like token '{token}' where positional '{param}' was expected; parameter order may be incorrect")]
    ArgumentPositionConflict { param: String, token: String },

    /// A router found a stray token matching no child name.
    ///
    /// Carries the rendered help of the group that rejected the token so the
    /// entry point can surface it without re-walking the tree.
    #[error("command '{name}' was not found")]
    UnknownCommand { name: String, help: String },

    /// Two parameters on one node share a name or short name.
    #[error("duplicate parameter name '{name}'")]
    DuplicateParameter { name: String },

    /// Two siblings under one group share a name.
    #[error("duplicate command name '{name}'")]
    DuplicateCommand { name: String },

    /// Handler-originated failure.
    #[error("{0}")]
    Failure(String),

    /// I/O failure outside the converter pipeline.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convenience constructor for handler failures.
    pub fn failure(message: impl Into<String>) -> Self {
        Error::Failure(message.into())
    }

    /// Exit code the entry points use when this error terminates a run.
    ///
    /// User-fixable problems exit 1; I/O failures follow the system-failure
    /// convention and exit 101.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 101,
            _ => 1,
        }
    }
}
