//! Error types for the `hello_world` example.

use thiserror::Error;

/// Convenience alias for results in the example.
pub type Result<T> = std::result::Result<T, HelloWorldError>;

/// Errors raised by the hello world example.
#[derive(Debug, Error)]
pub enum HelloWorldError {
    /// The command line could not be parsed.
    #[error(transparent)]
    Options(#[from] flagtag::FlagTagError),
    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl HelloWorldError {
    /// Returns `true` when the user asked for help.
    #[must_use]
    pub fn is_help_request(&self) -> bool {
        matches!(self, Self::Options(err) if err.is_help_request())
    }
}
