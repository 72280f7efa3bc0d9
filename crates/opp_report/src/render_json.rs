//! crates/opp_report/src/render_json.rs
//! Snapshot JSON. `render_json` is canonical (sorted keys, compact) so two
//! snapshots of the same state are byte-identical.

use opp_io::canonical_json::to_canonical_bytes;

use crate::model::DashboardSnapshot;
use crate::ReportError;

pub fn render_json(snapshot: &DashboardSnapshot) -> Result<String, ReportError> {
    let bytes = to_canonical_bytes(snapshot)?;
    String::from_utf8(bytes).map_err(|_| ReportError::Utf8)
}

/// Indented, field order as declared; for terminals.
pub fn render_json_pretty(snapshot: &DashboardSnapshot) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
