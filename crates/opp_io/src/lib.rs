//! crates/opp_io/src/lib.rs
//! Offline I/O for the portal: catalog loading and validation, config files,
//! canonical JSON output and SHA-256 fingerprints.
//!
//! - One shared error type (`IoError`) with `From` conversions used across modules.
//! - Nothing here touches the network; URL-looking paths are rejected early.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for opp_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read, create_dir_all, rename, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse/serialize errors with a line/column hint when available.
    #[error("json error at {at}: {msg}")]
    Json { at: String, msg: String },

    /// Catalog or config content that parses but breaks a domain rule.
    #[error("invalid: {0}")]
    Invalid(String),

    /// Input larger than the loader accepts.
    #[error("limit exceeded: {0}")]
    Limit(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        let at = if e.line() == 0 {
            "/".to_string()
        } else {
            format!("line {} column {}", e.line(), e.column())
        };
        IoError::Json { at, msg: e.to_string() }
    }
}

impl From<opp_core::CoreError> for IoError {
    fn from(e: opp_core::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

pub mod canonical_json;
pub mod catalog;
pub mod config;
pub mod demo;
#[cfg(feature = "hash")]
pub mod hasher;
pub mod loader;

pub use catalog::{unique_departments, CatalogProvider, SharedCatalog, StaticCatalog};
pub use config::load_config;
pub use demo::demo_catalog;
pub use loader::{load_catalog, parse_catalog};

/// True if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}
