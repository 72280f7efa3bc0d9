//! crates/opp_core/src/entities.rs
//! Catalog entities: branches (fixed sites) and opportunities (prospective
//! client sites, each tied to exactly one branch). Both are immutable after load.

use crate::geo::LngLat;
use crate::ids::{BranchCode, OpportunityId};
use crate::rounding::percent_rounded;

/// Branch assessment status; only drives iconography.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchStatus {
    #[cfg_attr(feature = "serde", serde(rename = "VALIDATED"))]
    Validated,
    #[cfg_attr(feature = "serde", serde(rename = "NEEDS ANALYSIS"))]
    NeedsAnalysis,
    #[cfg_attr(feature = "serde", serde(rename = "HIGH POTENTIAL"))]
    HighPotential,
    #[cfg_attr(feature = "serde", serde(rename = "LOW POTENTIAL"))]
    LowPotential,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl BranchStatus {
    /// Wire token (as written in catalog files).
    pub fn token(self) -> &'static str {
        match self {
            BranchStatus::Validated => "VALIDATED",
            BranchStatus::NeedsAnalysis => "NEEDS ANALYSIS",
            BranchStatus::HighPotential => "HIGH POTENTIAL",
            BranchStatus::LowPotential => "LOW POTENTIAL",
            BranchStatus::Unknown => "UNKNOWN",
        }
    }

    /// Icon name used by the feasibility panel.
    pub fn icon(self) -> &'static str {
        match self {
            BranchStatus::Validated => "check-circle",
            BranchStatus::NeedsAnalysis => "alert-triangle",
            BranchStatus::HighPotential => "trending-up",
            BranchStatus::LowPotential => "trending-down",
            BranchStatus::Unknown => "help-circle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategicValue {
    High,
    Medium,
    Low,
}

impl StrategicValue {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategicValue::High => "High",
            StrategicValue::Medium => "Medium",
            StrategicValue::Low => "Low",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Branch {
    pub code: BranchCode,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub median_income: f64,
    pub avg_travel_cost: String,
    /// Hyphen-delimited category tags, e.g. `"Mining-Logistics-Retail"`.
    pub opportunity_clusters: String,
    pub strategic_actions: String,
    pub status: BranchStatus,
}

impl Branch {
    #[inline]
    pub fn position(&self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }

    /// Cluster tags split on `-`, empty fragments dropped.
    pub fn clusters(&self) -> Vec<&str> {
        self.opportunity_clusters
            .split('-')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Opportunity {
    pub id: OpportunityId,
    pub name: String,
    pub department: String,
    pub branch_code: BranchCode,
    /// Display string (e.g. `"1,000-4,000"`); `max_employees` is the numeric bound.
    pub employees: String,
    pub max_employees: u32,
    pub current_penetration: u32,
    pub strategic_value: StrategicValue,
    /// Kilometres from the owning branch.
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Opportunity {
    #[inline]
    pub fn position(&self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }

    /// `current_penetration / max_employees` in `[0, 1]`; 0 when the bound is 0.
    pub fn penetration_fraction(&self) -> f64 {
        if self.max_employees == 0 {
            0.0
        } else {
            f64::from(self.current_penetration) / f64::from(self.max_employees)
        }
    }

    /// Penetration as a whole percent, rounded half-up.
    #[inline]
    pub fn penetration_percent(&self) -> u32 {
        percent_rounded(u64::from(self.current_penetration), u64::from(self.max_employees)) as u32
    }
}
