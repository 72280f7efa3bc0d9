//! crates/opp_map/src/lib.rs
//! Keeps an external map's markers and camera consistent with the dashboard's
//! derived state.
//!
//! The mapping library sits behind `MapRenderer`; `MapController` owns the one
//! viewport, rebuilds the marker set on every reconciliation pass, flies the
//! camera when selections change, and turns any renderer failure into a single
//! terminal state. `RecordingRenderer` is the in-process implementation used
//! by tests and headless runs.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Terminal map failures. `Display` is the user-facing message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("Failed to load mapping library")]
    LibraryLoad { detail: String },

    #[error("Mapbox token is missing")]
    MissingToken,

    #[error("Failed to initialize map")]
    Init { detail: String },

    #[error("Map failed to load")]
    Runtime { detail: String },

    /// A single marker could not be placed; not terminal.
    #[error("marker {key} rejected: {detail}")]
    Marker { key: String, detail: String },
}

pub mod controller;
pub mod elements;
pub mod recording;
pub mod renderer;

pub use controller::{MapController, MapScene, ReconcileReport};
pub use elements::{CameraTarget, MapEvent, MapIntent, MapStatus, MarkerElement, MarkerKey};
pub use recording::{CommandLog, RecordingRenderer, RenderCommand};
pub use renderer::MapRenderer;
