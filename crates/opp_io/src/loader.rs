//! crates/opp_io/src/loader.rs
//! Read a local catalog JSON file, enforce size limits, decode and validate.
//! No network I/O.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use opp_core::{Branch, Opportunity};
use serde::Deserialize;

use crate::catalog::StaticCatalog;
use crate::{looks_like_url_strict, IoError, IoResult};

/// Largest JSON input accepted by the loaders (16 MiB).
pub const MAX_JSON_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogWire {
    branches: Vec<Branch>,
    #[serde(default)]
    opportunities: Vec<Opportunity>,
}

/// Decode and validate a catalog held in memory.
pub fn parse_catalog(text: &str) -> IoResult<StaticCatalog> {
    let wire: CatalogWire = serde_json::from_str(text)?;
    let catalog = StaticCatalog::new(wire.branches, wire.opportunities)?;
    tracing::debug!(
        opportunities = catalog.len(),
        "catalog decoded"
    );
    Ok(catalog)
}

/// Load a catalog from a local path.
pub fn load_catalog(path: &Path) -> IoResult<StaticCatalog> {
    let text = read_text_with_limits(path)?;
    parse_catalog(&text)
}

/// Read a UTF-8 file, refusing URLs and anything above `MAX_JSON_BYTES`.
pub fn read_text_with_limits(path: &Path) -> IoResult<String> {
    let shown = path.display().to_string();
    if looks_like_url_strict(&shown) {
        return Err(IoError::Path(format!("URL paths are not allowed: {shown}")));
    }
    let f = File::open(path).map_err(|e| IoError::Path(format!("{shown}: {e}")))?;
    let len = f.metadata().map(|m| m.len()).unwrap_or(0);
    if len > MAX_JSON_BYTES {
        return Err(IoError::Limit(format!("{shown}: {len} bytes exceeds {MAX_JSON_BYTES}")));
    }
    let mut text = String::with_capacity(len as usize);
    f.take(MAX_JSON_BYTES + 1)
        .read_to_string(&mut text)
        .map_err(|e| IoError::Path(format!("{shown}: {e}")))?;
    if text.len() as u64 > MAX_JSON_BYTES {
        return Err(IoError::Limit(format!("{shown}: exceeds {MAX_JSON_BYTES} bytes")));
    }
    Ok(text)
}
