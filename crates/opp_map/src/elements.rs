//! crates/opp_map/src/elements.rs
//! Values exchanged with the renderer: marker keys and visuals, camera
//! targets, inbound events and the controller's status.

use core::fmt;

use opp_algo::{BranchMarkerStyle, OpportunityMarkerStyle};
use opp_core::{BranchCode, FlyParams, LngLat, OpportunityId};
use serde::{Serialize, Serializer};

/// Stable marker identity: `branch-{code}` or the opportunity id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerKey {
    Branch(BranchCode),
    Opportunity(OpportunityId),
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKey::Branch(code) => write!(f, "branch-{code}"),
            MarkerKey::Opportunity(id) => f.write_str(id.as_str()),
        }
    }
}

impl Serialize for MarkerKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// What to draw for a marker.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MarkerElement {
    Branch {
        city: String,
        #[serde(flatten)]
        style: BranchMarkerStyle,
    },
    Opportunity {
        name: String,
        #[serde(flatten)]
        style: OpportunityMarkerStyle,
    },
}

/// Smooth camera transition parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraTarget {
    pub center: LngLat,
    pub zoom: f64,
    pub speed: f64,
    pub curve: f64,
}

impl CameraTarget {
    pub fn new(center: LngLat, fly: FlyParams) -> Self {
        Self { center, zoom: fly.zoom, speed: fly.speed, curve: fly.curve }
    }
}

/// Events the host forwards from the mapping library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapEvent {
    MarkerClicked(MarkerKey),
    /// Runtime `error` event; the payload is kept for logs only.
    Error(String),
}

/// What the session should do in response to an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapIntent {
    SelectOpportunity(OpportunityId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum MapStatus {
    #[default]
    Unmounted,
    Ready,
    /// Terminal; carries the user-facing message.
    Failed(String),
}
