//! crates/opp_map/src/recording.rs
//! A renderer that draws nothing and records every command. Used by tests
//! and by the CLI's headless runs; the log handle stays valid after the
//! controller (and the renderer it owns) is dropped.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use opp_core::LngLat;
use serde::Serialize;

use crate::elements::{CameraTarget, MarkerElement, MarkerKey};
use crate::renderer::MapRenderer;
use crate::MapError;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum RenderCommand {
    CreateViewport { container: String, center: LngLat, zoom: f64, style: String },
    AddMarker { key: MarkerKey, position: LngLat, element: MarkerElement },
    RemoveMarker { key: MarkerKey },
    FlyTo { target: CameraTarget },
    DestroyViewport,
}

#[derive(Debug, Default)]
struct LogState {
    commands: Vec<RenderCommand>,
    live_markers: usize,
    live_viewports: usize,
}

/// Shared handle onto a `RecordingRenderer`'s log.
#[derive(Clone, Debug, Default)]
pub struct CommandLog(Rc<RefCell<LogState>>);

impl CommandLog {
    pub fn commands(&self) -> Vec<RenderCommand> {
        self.0.borrow().commands.clone()
    }

    /// Forget recorded commands; live counters are kept.
    pub fn clear(&self) {
        self.0.borrow_mut().commands.clear();
    }

    pub fn live_markers(&self) -> usize {
        self.0.borrow().live_markers
    }

    pub fn live_viewports(&self) -> usize {
        self.0.borrow().live_viewports
    }

    /// Keys added since the last `clear`, in order.
    pub fn added_keys(&self) -> Vec<MarkerKey> {
        self.0
            .borrow()
            .commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::AddMarker { key, .. } => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn fly_targets(&self) -> Vec<CameraTarget> {
        self.0
            .borrow()
            .commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::FlyTo { target } => Some(*target),
                _ => None,
            })
            .collect()
    }

    fn push(&self, cmd: RenderCommand) {
        self.0.borrow_mut().commands.push(cmd);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedViewport(u64);

#[derive(Debug)]
pub struct RecordedMarker {
    key: MarkerKey,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    log: CommandLog,
    next_viewport: u64,
    fail_viewport: Option<String>,
    reject: BTreeSet<MarkerKey>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    /// Make `create_viewport` fail with `detail`.
    pub fn failing_viewport(mut self, detail: impl Into<String>) -> Self {
        self.fail_viewport = Some(detail.into());
        self
    }

    /// Make `add_marker` reject `key`.
    pub fn rejecting(mut self, key: MarkerKey) -> Self {
        self.reject.insert(key);
        self
    }
}

impl MapRenderer for RecordingRenderer {
    type Viewport = RecordedViewport;
    type Marker = RecordedMarker;

    fn create_viewport(
        &mut self,
        container: &str,
        center: LngLat,
        zoom: f64,
        style: &str,
    ) -> Result<Self::Viewport, MapError> {
        if let Some(detail) = &self.fail_viewport {
            return Err(MapError::Init { detail: detail.clone() });
        }
        self.log.push(RenderCommand::CreateViewport {
            container: container.to_owned(),
            center,
            zoom,
            style: style.to_owned(),
        });
        self.log.0.borrow_mut().live_viewports += 1;
        self.next_viewport += 1;
        Ok(RecordedViewport(self.next_viewport))
    }

    fn add_marker(
        &mut self,
        _viewport: &Self::Viewport,
        key: &MarkerKey,
        position: LngLat,
        element: &MarkerElement,
    ) -> Result<Self::Marker, MapError> {
        if self.reject.contains(key) {
            return Err(MapError::Marker { key: key.to_string(), detail: "rejected".into() });
        }
        self.log.push(RenderCommand::AddMarker {
            key: key.clone(),
            position,
            element: element.clone(),
        });
        self.log.0.borrow_mut().live_markers += 1;
        Ok(RecordedMarker { key: key.clone() })
    }

    fn remove_marker(&mut self, marker: Self::Marker) {
        self.log.push(RenderCommand::RemoveMarker { key: marker.key });
        let mut state = self.log.0.borrow_mut();
        state.live_markers = state.live_markers.saturating_sub(1);
    }

    fn fly_to(&mut self, _viewport: &Self::Viewport, target: &CameraTarget) {
        self.log.push(RenderCommand::FlyTo { target: *target });
    }

    fn destroy_viewport(&mut self, _viewport: Self::Viewport) {
        self.log.push(RenderCommand::DestroyViewport);
        let mut state = self.log.0.borrow_mut();
        state.live_viewports = state.live_viewports.saturating_sub(1);
    }
}
