//! opp_report/src/lib.rs: offline dashboard snapshot model + renderers (JSON/HTML).
//!
//! Rules:
//! - No network and no file I/O here; callers write the rendered strings.
//! - Percent strings come from integer math in `opp_core::rounding`.
//! - Stable section order and field names (camelCase on the wire).

#![deny(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Fingerprinting or canonical encoding.
    #[error("io: {0}")]
    Io(#[from] opp_io::IoError),

    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("rendered output is not UTF-8")]
    Utf8,
}

pub mod model;
#[cfg(feature = "render_html")]
pub mod render_html;
#[cfg(feature = "render_json")]
pub mod render_json;

pub use model::{
    build_snapshot, BinChip, BranchPanel, DashboardSnapshot, Diagnostics, FilterSurface, InsightPanel,
    MapSummary, OpportunityCard, PageInfo,
};
#[cfg(feature = "render_html")]
pub use render_html::render_html;
#[cfg(feature = "render_json")]
pub use render_json::{render_json, render_json_pretty};
