// src/error.rs

//! Unified error handling for the portal client.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for portal operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Every variant is terminal for a run: nothing is retried, and the CLI maps
/// any of them to exit code 1.
#[derive(Error, Debug)]
pub enum AppError {
    /// Non-success HTTP status, transport failure or timeout
    #[error("Fetch error for {endpoint}: {message}")]
    Fetch { endpoint: String, message: String },

    /// Expected HTML or JSON structure is missing
    #[error("Parse error: {0}")]
    Parse(String),

    /// Portal rejected the credentials (no redirect after login)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Preferences file does not describe a complete ranking
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Portal rejected the submission or acknowledged it in an unexpected way
    #[error("Submission failed: {0}")]
    Submit(String),

    /// Missing or malformed credentials, preferences or settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Problems found while checking a preferences file against the catalog.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Station \"{station}\" on line {line} of {} is not a valid station", path.display())]
    UnknownStation {
        station: String,
        line: usize,
        path: PathBuf,
    },

    #[error(
        "Station \"{station}\" was originally on line {first_line} of {} but was repeated on line {repeat_line}",
        path.display()
    )]
    DuplicateStation {
        station: String,
        first_line: usize,
        repeat_line: usize,
        path: PathBuf,
    },

    #[error("Stations that you have to add to {}: {}", path.display(), join_names(missing))]
    Incomplete {
        missing: BTreeSet<String>,
        path: PathBuf,
    },
}

fn join_names(names: &BTreeSet<String>) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    /// Create a fetch error for an endpoint.
    pub fn fetch(endpoint: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a submission error.
    pub fn submit(message: impl Into<String>) -> Self {
        Self::Submit(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Configuration error for a file that does not exist.
    pub fn missing_file(what: &str, path: &Path) -> Self {
        Self::Config(format!("{what} file ({}) not found", path.display()))
    }

    /// Whether this error belongs to the fetch kind (status, transport, timeout).
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        if err.is_timeout() {
            Self::fetch(endpoint, "request timed out")
        } else {
            Self::fetch(endpoint, err)
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(format!("invalid JSON: {err}"))
    }
}
