//! crates/opp_core/src/config.rs
//! Dashboard tunables with safe defaults. Every field is defaulted so a partial
//! JSON file (or none) is valid input.

use crate::errors::CoreError;
use crate::geo::LngLat;

/// Camera transition parameters for one trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlyParams {
    pub zoom: f64,
    pub speed: f64,
    pub curve: f64,
}

impl FlyParams {
    pub const fn new(zoom: f64, speed: f64, curve: f64) -> Self {
        Self { zoom, speed, curve }
    }

    fn is_sane(&self) -> bool {
        self.zoom.is_finite()
            && (0.0..=24.0).contains(&self.zoom)
            && self.speed.is_finite()
            && self.speed > 0.0
            && self.curve.is_finite()
            && self.curve > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DashboardConfig {
    pub page_size: usize,
    pub insight_debounce_ms: u64,
    pub national_center: LngLat,
    pub national_zoom: f64,
    /// Zoom used when the viewport is created while a branch is already selected.
    pub initial_branch_zoom: f64,
    pub branch_fly: FlyParams,
    pub national_fly: FlyParams,
    pub opportunity_fly: FlyParams,
    pub map_style: String,
    /// Renderer credential; the CLI overrides it from `MAPBOX_ACCESS_TOKEN`.
    pub access_token: Option<String>,
}

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            insight_debounce_ms: DEFAULT_DEBOUNCE_MS,
            national_center: LngLat::new(24.5, -29.0),
            national_zoom: 5.0,
            initial_branch_zoom: 10.0,
            branch_fly: FlyParams::new(12.0, 1.8, 1.4),
            national_fly: FlyParams::new(5.0, 1.8, 1.42),
            opportunity_fly: FlyParams::new(14.0, 1.5, 1.0),
            map_style: "mapbox://styles/mapbox/light-v11".to_string(),
            access_token: None,
        }
    }
}

impl DashboardConfig {
    /// Domain checks; the first violation wins.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page_size == 0 {
            return Err(CoreError::DomainOutOfRange("page_size"));
        }
        if !self.national_center.is_valid() {
            return Err(CoreError::InvalidCoordinate);
        }
        if !self.national_zoom.is_finite() || !self.initial_branch_zoom.is_finite() {
            return Err(CoreError::DomainOutOfRange("zoom"));
        }
        if !self.branch_fly.is_sane() {
            return Err(CoreError::DomainOutOfRange("branch_fly"));
        }
        if !self.national_fly.is_sane() {
            return Err(CoreError::DomainOutOfRange("national_fly"));
        }
        if !self.opportunity_fly.is_sane() {
            return Err(CoreError::DomainOutOfRange("opportunity_fly"));
        }
        Ok(())
    }

    /// Non-empty token, if any.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}
