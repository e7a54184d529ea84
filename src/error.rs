//! Error handling module for gkit
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Every variant here is fatal for the interactive session: the driver
//! restores the terminal, prints the message and exits non-zero.

use thiserror::Error;

/// Main error type for gkit
#[derive(Error, Debug)]
pub enum GkitError {
    /// Network or TLS failure talking to the registry
    #[error("search request failed: {0}")]
    SearchTransport(#[from] reqwest::Error),

    /// Registry answered with a non-success status
    #[error("search for {url} failed: {status}")]
    SearchStatus { url: String, status: String },

    /// Registry answered with a body we could not make sense of
    #[error("unexpected search response: {0}")]
    SearchParse(String),

    /// The install command could not be started
    #[error("failed to start `{program}`: {source}")]
    ExecutorLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Terminal setup, drawing or input errors
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Invalid CLI or environment configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for gkit operations
pub type Result<T> = std::result::Result<T, GkitError>;

impl GkitError {
    /// Create a search parse error
    pub fn search_parse(msg: impl Into<String>) -> Self {
        Self::SearchParse(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a launch error for `program`
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::ExecutorLaunch {
            program: program.into(),
            source,
        }
    }
}
