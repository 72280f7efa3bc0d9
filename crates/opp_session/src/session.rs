//! crates/opp_session/src/session.rs
//! Session controller.
//!
//! Flow: a setter replaces the criteria, the engine recomputes the ranked
//! subset, the cursor resets, the selection clears and the insight debounce
//! re-arms. Setting criteria equal to the current ones changes nothing.
//! The insight text is produced only when `poll` (or `flush`) finds the
//! debounce due, which keeps rapid typing down to one recomputation.

use std::time::Duration;

use opp_algo::{filter_indices, PageCursor, SelectionTotals};
use opp_core::{
    BinKind, Branch, BranchSelection, DashboardConfig, FilterCriteria, FilterUpdate, Opportunity, OpportunityId,
};
use opp_io::{unique_departments, SharedCatalog};
use opp_map::{MapController, MapEvent, MapIntent, MapRenderer, MapScene, ReconcileReport};

use crate::debounce::{Clock, Debouncer, SystemClock};
use crate::insight::{insight_text, insight_title};

pub struct DashboardSession<C: Clock = SystemClock> {
    catalog: SharedCatalog,
    config: DashboardConfig,
    criteria: FilterCriteria,
    /// Catalog indices of the ranked subset.
    filtered: Vec<usize>,
    cursor: PageCursor,
    selected_opportunity: Option<OpportunityId>,
    debouncer: Debouncer,
    clock: C,
    insight: String,
    is_loading: bool,
    insight_revision: u64,
}

impl DashboardSession<SystemClock> {
    pub fn new(catalog: SharedCatalog, config: DashboardConfig) -> Self {
        Self::with_clock(catalog, config, SystemClock::new())
    }
}

impl<C: Clock> DashboardSession<C> {
    /// Start a session in the national view. The insight debounce is armed
    /// immediately, so `is_loading` is true until the first `poll` fires it.
    pub fn with_clock(catalog: SharedCatalog, config: DashboardConfig, clock: C) -> Self {
        let criteria = FilterCriteria::default();
        let filtered = filter_indices(catalog.opportunities(), &criteria);
        let mut debouncer = Debouncer::new(Duration::from_millis(config.insight_debounce_ms));
        debouncer.schedule(clock.now());
        tracing::debug!(
            opportunities = catalog.opportunities().len(),
            visible = filtered.len(),
            "session started"
        );
        Self {
            cursor: PageCursor::new(config.page_size),
            catalog,
            config,
            criteria,
            filtered,
            selected_opportunity: None,
            debouncer,
            clock,
            insight: String::new(),
            is_loading: true,
            insight_revision: 0,
        }
    }

    /* ------------------------------ Derived views ------------------------------ */

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn filtered_opportunities(&self) -> Vec<&Opportunity> {
        let all = self.catalog.opportunities();
        self.filtered.iter().map(|&i| &all[i]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn paginated_opportunities(&self) -> Vec<&Opportunity> {
        let all = self.catalog.opportunities();
        self.cursor.window(&self.filtered).window.iter().map(|&i| &all[i]).collect()
    }

    pub fn total_pages(&self) -> usize {
        self.cursor.total_pages(self.filtered.len())
    }

    pub fn current_page(&self) -> usize {
        self.cursor.page()
    }

    /// The selected branch when the criteria name one that exists.
    pub fn selected_branch(&self) -> Option<&Branch> {
        self.criteria.branch.code().and_then(|code| self.catalog.branch(code))
    }

    pub fn selected_opportunity(&self) -> Option<&Opportunity> {
        self.selected_opportunity.as_ref().and_then(|id| self.catalog.opportunity(id))
    }

    /// Latest settled insight; empty before the first firing.
    pub fn insight_text(&self) -> &str {
        &self.insight
    }

    pub fn insight_title(&self) -> String {
        insight_title(self.selected_branch())
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Number of insight recomputations so far.
    pub fn insight_revision(&self) -> u64 {
        self.insight_revision
    }

    pub fn has_active_filters(&self) -> bool {
        self.criteria.has_active_filters()
    }

    /// Distance bins only apply relative to a branch.
    pub fn distance_filter_enabled(&self) -> bool {
        !self.criteria.is_national_view()
    }

    pub fn departments(&self) -> Vec<&str> {
        unique_departments(&*self.catalog)
    }

    pub fn totals(&self) -> SelectionTotals {
        SelectionTotals::from_opportunities(self.filtered_opportunities())
    }

    /* -------------------------------- Mutators -------------------------------- */

    /// Swap in `next`. Returns false when nothing changed.
    fn replace_criteria(&mut self, next: FilterCriteria) -> bool {
        if next == self.criteria {
            return false;
        }
        self.criteria = next;
        self.filtered = filter_indices(self.catalog.opportunities(), &self.criteria);
        self.cursor.reset();
        self.selected_opportunity = None;
        self.is_loading = true;
        self.debouncer.schedule(self.clock.now());
        tracing::debug!(branch = %self.criteria.branch, visible = self.filtered.len(), "criteria replaced");
        true
    }

    pub fn set_filter_field(&mut self, update: FilterUpdate) -> bool {
        let next = self.criteria.with_update(update);
        self.replace_criteria(next)
    }

    /// String-keyed variant; unknown field keys are ignored with a warning.
    pub fn set_filter_field_str(&mut self, key: &str, value: &str) -> bool {
        match FilterUpdate::from_key_value(key, value) {
            Some(update) => self.set_filter_field(update),
            None => {
                tracing::warn!("unknown filter field '{}', ignored", key);
                false
            }
        }
    }

    pub fn toggle_department(&mut self, department: &str) -> bool {
        let next = self.criteria.with_department_toggled(department);
        self.replace_criteria(next)
    }

    pub fn toggle_bin(&mut self, kind: BinKind, key: &str) -> bool {
        let next = self.criteria.with_bin_toggled(kind, key);
        self.replace_criteria(next)
    }

    /// Departments and bins back to All; branch and search term stay.
    pub fn clear_filters(&mut self) -> bool {
        let next = self.criteria.cleared();
        self.replace_criteria(next)
    }

    /// Choosing a concrete branch also clears the search term.
    pub fn select_branch(&mut self, branch: BranchSelection) -> bool {
        let mut next = self.criteria.with_update(FilterUpdate::Branch(branch));
        if !next.is_national_view() {
            next.search_term.clear();
        }
        self.replace_criteria(next)
    }

    pub fn set_page(&mut self, page: usize) -> usize {
        self.cursor.set_page(page, self.filtered.len())
    }

    pub fn next_page(&mut self) -> usize {
        self.cursor.next(self.filtered.len())
    }

    pub fn previous_page(&mut self) -> usize {
        self.cursor.previous()
    }

    /// Select a visible opportunity, or clear with `None`. Ids outside the
    /// filtered set are ignored.
    pub fn select_opportunity(&mut self, id: Option<OpportunityId>) -> bool {
        match id {
            None => self.selected_opportunity.take().is_some(),
            Some(id) => {
                let all = self.catalog.opportunities();
                if !self.filtered.iter().any(|&i| all[i].id == id) {
                    tracing::debug!(%id, "selection ignored: not in the filtered set");
                    return false;
                }
                if self.selected_opportunity.as_ref() == Some(&id) {
                    return false;
                }
                self.selected_opportunity = Some(id);
                true
            }
        }
    }

    /* --------------------------------- Insight -------------------------------- */

    /// Fire the insight recomputation if its debounce is due.
    pub fn poll(&mut self) -> bool {
        match self.debouncer.fire_if_due(self.clock.now()) {
            Some(_) => {
                self.recompute_insight();
                true
            }
            None => false,
        }
    }

    /// Fire a pending insight recomputation now, without waiting.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.cancel() {
            Some(_) => {
                self.recompute_insight();
                true
            }
            None => false,
        }
    }

    /// Time left until the pending insight fires.
    pub fn insight_due_in(&self) -> Option<Duration> {
        self.debouncer.pending().map(|h| h.due.saturating_sub(self.clock.now()))
    }

    fn recompute_insight(&mut self) {
        self.insight = insight_text(&self.totals());
        self.insight_revision += 1;
        self.is_loading = false;
        tracing::trace!(revision = self.insight_revision, "insight recomputed");
    }

    /* ----------------------------------- Map ---------------------------------- */

    /// Reconcile markers and camera with the current state.
    pub fn sync_map<R: MapRenderer>(&self, map: &mut MapController<R>) -> ReconcileReport {
        let filtered = self.filtered_opportunities();
        let page = self.paginated_opportunities();
        let report = map.reconcile(&MapScene {
            branches: self.catalog.branches(),
            filtered: &filtered,
            page: &page,
            selected_branch: self.criteria.branch.code(),
            selected_opportunity: self.selected_opportunity.as_ref(),
        });
        map.sync_camera(self.selected_branch(), self.selected_opportunity());
        report
    }

    /// Route a renderer event; a marker click selects its opportunity.
    pub fn handle_map_event<R: MapRenderer>(&mut self, map: &mut MapController<R>, event: MapEvent) -> bool {
        match map.handle_event(event) {
            Some(MapIntent::SelectOpportunity(id)) => self.select_opportunity(Some(id)),
            None => false,
        }
    }
}
