//! Error types for searching and configuration

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a search before any request is sent
#[derive(Debug, Error)]
pub enum SearchError {
    /// The configured endpoint is not an absolute URL
    #[error("Invalid search endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// The endpoint parsed but cannot carry a query string (e.g. `mailto:`)
    #[error("Search endpoint '{endpoint}' cannot carry a query")]
    UnsupportedEndpoint { endpoint: String },
}

/// Errors that occur while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
