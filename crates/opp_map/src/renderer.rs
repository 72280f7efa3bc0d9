//! crates/opp_map/src/renderer.rs
//! The capability the controller needs from a mapping library.
//!
//! Click and error callbacks are not registered per marker: the host forwards
//! them to `MapController::handle_event` as `MapEvent`s, carrying the
//! `MarkerKey` handed over in `add_marker`.

use opp_core::LngLat;

use crate::elements::{CameraTarget, MarkerElement, MarkerKey};
use crate::MapError;

pub trait MapRenderer {
    /// Handle to a live map instance.
    type Viewport;
    /// Handle to one placed marker.
    type Marker;

    fn create_viewport(
        &mut self,
        container: &str,
        center: LngLat,
        zoom: f64,
        style: &str,
    ) -> Result<Self::Viewport, MapError>;

    fn add_marker(
        &mut self,
        viewport: &Self::Viewport,
        key: &MarkerKey,
        position: LngLat,
        element: &MarkerElement,
    ) -> Result<Self::Marker, MapError>;

    fn remove_marker(&mut self, marker: Self::Marker);

    fn fly_to(&mut self, viewport: &Self::Viewport, target: &CameraTarget);

    /// Release the instance and everything attached to it.
    fn destroy_viewport(&mut self, viewport: Self::Viewport);
}
