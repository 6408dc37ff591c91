// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Backend returned HTTP {status} for {url}")]
    BackendStatus { status: u16, url: String },

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    /// Submitting an upload with an empty pending set. No request is sent.
    #[error("No files selected")]
    NoFilesSelected,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::MalformedResponse(err.to_string())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DashboardError>;
