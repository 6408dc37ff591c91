// src/config/mod.rs

//! Configuration loading and validation for taskboard.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate durations, URL and upload settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{
    parse_duration, ConfigFile, RawConfigFile, RefreshSection, ServerSection, UiSection,
    UploadSection,
};
