//! crates/opp_map/src/controller.rs
//! Map Synchronization Controller.
//!
//! Lifecycle: `mount` creates the viewport once (or lands in `Failed`),
//! `reconcile` clears and rebuilds every marker, `sync_camera` flies on
//! selection changes, `unmount` releases markers then the viewport. Once the
//! status is `Failed` every operation except `unmount` is a no-op.
//!
//! Reconciliation is a full rebuild rather than a keyed diff. At catalog sizes
//! in the low thousands the rebuild is a few thousand renderer calls per pass.

use std::collections::BTreeSet;

use opp_algo::{branch_marker_style, opportunity_marker_style};
use opp_core::{Branch, BranchCode, DashboardConfig, FlyParams, LngLat, Opportunity, OpportunityId};
use serde::Serialize;

use crate::elements::{CameraTarget, MapEvent, MapIntent, MapStatus, MarkerElement, MarkerKey};
use crate::renderer::MapRenderer;
use crate::MapError;

/// Everything one reconciliation pass needs to know.
#[derive(Clone, Copy, Debug)]
pub struct MapScene<'a> {
    /// All branches; they are drawn regardless of filters.
    pub branches: &'a [Branch],
    /// Full filtered set, ranked.
    pub filtered: &'a [&'a Opportunity],
    /// Current page window.
    pub page: &'a [&'a Opportunity],
    pub selected_branch: Option<&'a BranchCode>,
    pub selected_opportunity: Option<&'a OpportunityId>,
}

/// Outcome of one reconciliation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub branches_placed: usize,
    pub opportunities_placed: usize,
    pub removed: usize,
    /// Markers not placed: invalid coordinates or rejected by the renderer.
    pub skipped: Vec<MarkerKey>,
}

/// Camera-relevant branch state: `None` is the national view.
type BranchCamera = Option<BranchCode>;

pub struct MapController<R: MapRenderer> {
    /// `None` when the mapping library never loaded.
    renderer: Option<R>,
    viewport: Option<R::Viewport>,
    markers: Vec<(MarkerKey, R::Marker)>,
    status: MapStatus,
    national_center: LngLat,
    national_fly: FlyParams,
    branch_fly: FlyParams,
    opportunity_fly: FlyParams,
    camera_branch: BranchCamera,
    camera_opportunity: Option<OpportunityId>,
    last_camera: Option<CameraTarget>,
}

impl<R: MapRenderer> MapController<R> {
    /// Create the viewport once. `loaded` is the outcome of loading the
    /// mapping library. Never fails: a missing library, a missing token or a
    /// viewport error leaves the controller in `MapStatus::Failed`.
    pub fn mount(
        loaded: Result<R, MapError>,
        config: &DashboardConfig,
        container: &str,
        selected_branch: Option<&Branch>,
    ) -> Self {
        let mut ctl = Self {
            renderer: None,
            viewport: None,
            markers: Vec::new(),
            status: MapStatus::Unmounted,
            national_center: config.national_center,
            national_fly: config.national_fly,
            branch_fly: config.branch_fly,
            opportunity_fly: config.opportunity_fly,
            camera_branch: selected_branch.map(|b| b.code.clone()),
            camera_opportunity: None,
            last_camera: None,
        };

        let mut renderer = match loaded {
            Ok(r) => r,
            Err(e) => {
                ctl.fail(e);
                return ctl;
            }
        };
        if config.token().is_none() {
            ctl.renderer = Some(renderer);
            ctl.fail(MapError::MissingToken);
            return ctl;
        }

        let (center, zoom) = match selected_branch.and_then(|b| b.position().validated()) {
            Some(pos) => (pos, config.initial_branch_zoom),
            None => (config.national_center, config.national_zoom),
        };
        let created = renderer.create_viewport(container, center, zoom, &config.map_style);
        ctl.renderer = Some(renderer);
        match created {
            Ok(vp) => {
                tracing::info!(container, %center, zoom, "map viewport created");
                ctl.viewport = Some(vp);
                ctl.status = MapStatus::Ready;
            }
            Err(e) => ctl.fail(MapError::Init { detail: e.to_string() }),
        }
        ctl
    }

    #[inline]
    pub fn status(&self) -> &MapStatus {
        &self.status
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.status == MapStatus::Ready
    }

    /// The failure message once the map is unavailable.
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            MapStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Most recent camera transition issued, if any.
    pub fn last_camera(&self) -> Option<&CameraTarget> {
        self.last_camera.as_ref()
    }

    /// Remove every marker, then place one per branch and one per filtered
    /// opportunity. Safe to call any number of times.
    pub fn reconcile(&mut self, scene: &MapScene<'_>) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        if !self.is_ready() {
            return report;
        }
        report.removed = self.clear_markers();
        let (Some(renderer), Some(viewport)) = (self.renderer.as_mut(), self.viewport.as_ref()) else {
            return report;
        };

        for b in scene.branches {
            let key = MarkerKey::Branch(b.code.clone());
            let selected = scene.selected_branch == Some(&b.code);
            let element = MarkerElement::Branch {
                city: b.city.clone(),
                style: branch_marker_style(selected),
            };
            if place(renderer, viewport, &mut self.markers, key, b.position(), &element, &mut report.skipped) {
                report.branches_placed += 1;
            }
        }

        let in_page: BTreeSet<&OpportunityId> = scene.page.iter().map(|o| &o.id).collect();
        for o in scene.filtered {
            let key = MarkerKey::Opportunity(o.id.clone());
            let selected = scene.selected_opportunity == Some(&o.id);
            let element = MarkerElement::Opportunity {
                name: o.name.clone(),
                style: opportunity_marker_style(o, in_page.contains(&o.id), selected),
            };
            if place(renderer, viewport, &mut self.markers, key, o.position(), &element, &mut report.skipped) {
                report.opportunities_placed += 1;
            }
        }

        tracing::debug!(
            branches = report.branches_placed,
            opportunities = report.opportunities_placed,
            skipped = report.skipped.len(),
            "markers reconciled"
        );
        report
    }

    /// Fly the camera when the branch or the opportunity selection changed
    /// since the last call. Branch first, then the closer opportunity view.
    pub fn sync_camera(&mut self, selected_branch: Option<&Branch>, selected_opportunity: Option<&Opportunity>) {
        if !self.is_ready() {
            return;
        }

        let branch_now: BranchCamera = selected_branch.map(|b| b.code.clone());
        if branch_now != self.camera_branch {
            self.camera_branch = branch_now;
            let target = match selected_branch {
                Some(b) => b.position().validated().map(|p| CameraTarget::new(p, self.branch_fly)),
                None => Some(CameraTarget::new(self.national_center, self.national_fly)),
            };
            match target {
                Some(t) => self.fly(t),
                None => tracing::debug!("branch camera skipped: invalid coordinates"),
            }
        }

        let opp_now = selected_opportunity.map(|o| o.id.clone());
        if opp_now != self.camera_opportunity {
            self.camera_opportunity = opp_now;
            if let Some(o) = selected_opportunity {
                match o.position().validated() {
                    Some(p) => self.fly(CameraTarget::new(p, self.opportunity_fly)),
                    None => tracing::debug!(id = %o.id, "opportunity camera skipped: invalid coordinates"),
                }
            }
        }
    }

    fn fly(&mut self, target: CameraTarget) {
        if let (Some(renderer), Some(vp)) = (self.renderer.as_mut(), self.viewport.as_ref()) {
            renderer.fly_to(vp, &target);
            self.last_camera = Some(target);
        }
    }

    /// Route a renderer event. Opportunity clicks become a selection intent;
    /// a runtime error enters the terminal failure state.
    pub fn handle_event(&mut self, event: MapEvent) -> Option<MapIntent> {
        if !self.is_ready() {
            return None;
        }
        match event {
            MapEvent::MarkerClicked(MarkerKey::Opportunity(id)) => Some(MapIntent::SelectOpportunity(id)),
            MapEvent::MarkerClicked(MarkerKey::Branch(_)) => None,
            MapEvent::Error(detail) => {
                self.fail(MapError::Runtime { detail });
                None
            }
        }
    }

    /// Enter the terminal failure state.
    pub fn fail(&mut self, e: MapError) {
        match &e {
            MapError::LibraryLoad { detail } | MapError::Init { detail } | MapError::Runtime { detail } => {
                tracing::error!(%detail, "{e}")
            }
            _ => tracing::error!("{e}"),
        }
        self.status = MapStatus::Failed(e.to_string());
    }

    /// Release markers, then the viewport. Idempotent.
    pub fn unmount(&mut self) {
        self.clear_markers();
        if let (Some(renderer), Some(vp)) = (self.renderer.as_mut(), self.viewport.take()) {
            renderer.destroy_viewport(vp);
            tracing::info!("map viewport destroyed");
        }
        self.status = MapStatus::Unmounted;
    }

    fn clear_markers(&mut self) -> usize {
        let n = self.markers.len();
        if let Some(renderer) = self.renderer.as_mut() {
            for (_, m) in self.markers.drain(..) {
                renderer.remove_marker(m);
            }
        }
        n
    }
}

impl<R: MapRenderer> Drop for MapController<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Place one marker if its coordinates pass the guard. Returns whether it was placed.
fn place<R: MapRenderer>(
    renderer: &mut R,
    viewport: &R::Viewport,
    markers: &mut Vec<(MarkerKey, R::Marker)>,
    key: MarkerKey,
    position: LngLat,
    element: &MarkerElement,
    skipped: &mut Vec<MarkerKey>,
) -> bool {
    if !position.is_valid() {
        tracing::debug!(%key, %position, "marker skipped: invalid coordinates");
        skipped.push(key);
        return false;
    }
    match renderer.add_marker(viewport, &key, position, element) {
        Ok(m) => {
            markers.push((key, m));
            true
        }
        Err(e) => {
            tracing::warn!(%key, "{e}");
            skipped.push(key);
            false
        }
    }
}

/* ---------------------------------- Tests --------------------------------- */
