//! Marker styling rules: how an opportunity or branch looks on the map.
//!
//! Opportunity size scales linearly with `max_employees` over 0..4000 and is
//! clamped to 24..=48 px. Tone follows the rounded penetration percent.

use opp_core::rounding::compact_count;
use opp_core::Opportunity;

pub const MIN_MARKER_PX: f64 = 24.0;
pub const MAX_MARKER_PX: f64 = 48.0;
pub const SIZE_SCALE_EMPLOYEES: f64 = 4000.0;
pub const BRANCH_MARKER_PX: f64 = 40.0;

const SELECTED_OPPORTUNITY_SCALE: f64 = 1.25;
const SELECTED_BRANCH_SCALE: f64 = 1.1;
const OUT_OF_PAGE_OPACITY: f64 = 0.5;

/// Penetration colour class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

impl Tone {
    /// `<=15` success, `<=30` warning, else danger.
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            0..=15 => Tone::Success,
            16..=30 => Tone::Warning,
            _ => Tone::Danger,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
        }
    }
}

/// Pixel size for an opportunity marker.
pub fn marker_size(max_employees: u32) -> f64 {
    let raw = f64::from(max_employees) / SIZE_SCALE_EMPLOYEES * MAX_MARKER_PX;
    raw.clamp(MIN_MARKER_PX, MAX_MARKER_PX)
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OpportunityMarkerStyle {
    pub size_px: f64,
    pub tone: Tone,
    /// Headcount label (`"1.5k"` above 999).
    pub label: String,
    pub font_px: u32,
    pub opacity: f64,
    pub scale: f64,
    pub ring: bool,
    pub z_index: u32,
}

pub fn opportunity_marker_style(o: &Opportunity, in_page: bool, selected: bool) -> OpportunityMarkerStyle {
    let size_px = marker_size(o.max_employees);
    OpportunityMarkerStyle {
        size_px,
        tone: Tone::from_percent(o.penetration_percent()),
        label: compact_count(o.max_employees),
        font_px: if size_px > 32.0 { 12 } else { 10 },
        opacity: if in_page { 1.0 } else { OUT_OF_PAGE_OPACITY },
        scale: if selected { SELECTED_OPPORTUNITY_SCALE } else { 1.0 },
        ring: selected,
        z_index: if selected { 2 } else { 1 },
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BranchMarkerStyle {
    pub size_px: f64,
    pub scale: f64,
    /// Accent colour instead of the neutral one.
    pub accent: bool,
}

pub fn branch_marker_style(selected: bool) -> BranchMarkerStyle {
    BranchMarkerStyle {
        size_px: BRANCH_MARKER_PX,
        scale: if selected { SELECTED_BRANCH_SCALE } else { 1.0 },
        accent: selected,
    }
}
