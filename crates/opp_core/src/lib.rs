//! opp_core: core types, domains, ordering helpers and integer-first formatting.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! portal (`opp_io`, `opp_algo`, `opp_map`, `opp_session`, `opp_report`, `opp_cli`).
//!
//! - Identity tokens: `BranchCode`, `OpportunityId`
//! - Catalog entities: `Branch`, `Opportunity`
//! - Geo guard: `LngLat`, `is_valid_coordinate`
//! - Bin domains: `EmployeeBin`, `DistanceBin` (unknown keys fall back to `All`)
//! - Session-facing criteria: `FilterCriteria`, `BranchSelection`, `FilterUpdate`
//! - Tunables: `DashboardConfig`
//! - Percent / thousands formatting without float rounding surprises
//!
//! Serialization derives are gated behind the `serde` feature (on by default).

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidToken,
        InvalidCoordinate,
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::InvalidCoordinate => write!(f, "invalid coordinate"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod ids;
pub mod geo;
pub mod entities;
pub mod bins;
pub mod criteria;
pub mod config;
pub mod determinism;
pub mod rounding;

pub use bins::{BinKind, DistanceBin, EmployeeBin};
pub use config::{DashboardConfig, FlyParams};
pub use criteria::{BranchSelection, FilterCriteria, FilterUpdate};
pub use entities::{Branch, BranchStatus, Opportunity, StrategicValue};
pub use errors::CoreError;
pub use geo::{is_valid_coordinate, LngLat};
pub use ids::{BranchCode, OpportunityId};
