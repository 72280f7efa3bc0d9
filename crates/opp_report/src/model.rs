//! crates/opp_report/src/model.rs
//! Typed view of everything the dashboard shows at one instant.

use opp_algo::{SelectionTotals, Tone};
use opp_core::rounding::format_amount_2dp;
use opp_core::{Branch, DistanceBin, EmployeeBin, FilterCriteria, Opportunity};
use opp_io::hasher::catalog_fingerprint;
use opp_map::{CameraTarget, MapController, MapRenderer, MapStatus, ReconcileReport};
use opp_session::{Clock, DashboardSession};
use serde::Serialize;

use crate::ReportError;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub catalog_fingerprint: String,
    pub criteria: FilterCriteria,
    pub filters: FilterSurface,
    pub page: PageInfo,
    pub totals: SelectionTotals,
    pub insight: InsightPanel,
    pub branch_panel: Option<BranchPanel>,
    pub cards: Vec<OpportunityCard>,
    pub map: Option<MapSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinChip {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSurface {
    pub departments: Vec<String>,
    pub employee_bins: Vec<BinChip>,
    pub distance_bins: Vec<BinChip>,
    pub distance_enabled: bool,
    pub has_active_filters: bool,
}

impl FilterSurface {
    fn from_criteria(c: &FilterCriteria, departments: Vec<String>) -> Self {
        Self {
            departments,
            employee_bins: EmployeeBin::CHOICES
                .iter()
                .map(|b| BinChip { key: b.key(), label: b.label(), active: *b == c.employee_bin })
                .collect(),
            distance_bins: DistanceBin::CHOICES
                .iter()
                .map(|b| BinChip { key: b.key(), label: b.label(), active: *b == c.distance_bin })
                .collect(),
            distance_enabled: !c.is_national_view(),
            has_active_filters: c.has_active_filters(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_results: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPanel {
    pub title: String,
    pub text: String,
    pub is_loading: bool,
}

/// Feasibility panel for a concrete branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPanel {
    pub code: String,
    pub city: String,
    pub status: &'static str,
    pub status_icon: &'static str,
    /// `R` + two decimals with `,` grouping.
    pub median_income: String,
    pub avg_travel_cost: String,
    pub clusters: Vec<String>,
    pub strategic_actions: String,
}

impl From<&Branch> for BranchPanel {
    fn from(b: &Branch) -> Self {
        Self {
            code: b.code.to_string(),
            city: b.city.clone(),
            status: b.status.token(),
            status_icon: b.status.icon(),
            median_income: format!("R{}", format_amount_2dp(b.median_income)),
            avg_travel_cost: b.avg_travel_cost.clone(),
            clusters: b.clusters().into_iter().map(str::to_owned).collect(),
            strategic_actions: b.strategic_actions.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityCard {
    pub id: String,
    pub name: String,
    pub employees: String,
    pub department: String,
    pub strategic_value: &'static str,
    pub distance: String,
    pub penetration_percent: u32,
    pub tone: Tone,
    pub selected: bool,
}

impl OpportunityCard {
    pub fn new(o: &Opportunity, selected: bool) -> Self {
        let pct = o.penetration_percent();
        Self {
            id: o.id.to_string(),
            name: o.name.clone(),
            employees: o.employees.clone(),
            department: o.department.clone(),
            strategic_value: o.strategic_value.as_str(),
            distance: format!("{}km away", o.distance),
            penetration_percent: pct,
            tone: Tone::from_percent(pct),
            selected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    pub status: MapStatus,
    pub markers: usize,
    pub reconcile: Option<ReconcileReport>,
    pub camera: Option<CameraTarget>,
}

impl MapSummary {
    pub fn from_controller<R: MapRenderer>(map: &MapController<R>, reconcile: Option<ReconcileReport>) -> Self {
        Self {
            status: map.status().clone(),
            markers: map.marker_count(),
            reconcile,
            camera: map.last_camera().copied(),
        }
    }
}

/// Runtime facts shown on the diagnostics panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub access_token_present: bool,
    pub environment: &'static str,
    pub page_size: usize,
    pub debounce_ms: u64,
}

impl Diagnostics {
    pub fn new(config: &opp_core::DashboardConfig) -> Self {
        Self {
            access_token_present: config.token().is_some(),
            environment: if cfg!(debug_assertions) { "development" } else { "production" },
            page_size: config.page_size,
            debounce_ms: config.insight_debounce_ms,
        }
    }

    /// `"Set"` or `"Missing"`.
    pub fn token_label(&self) -> &'static str {
        if self.access_token_present { "Set" } else { "Missing" }
    }
}

/// Capture the session (and optionally the map) as a snapshot.
pub fn build_snapshot<C: Clock>(
    session: &DashboardSession<C>,
    map: Option<MapSummary>,
) -> Result<DashboardSnapshot, ReportError> {
    let criteria = session.criteria().clone();
    let selected = session.selected_opportunity().map(|o| o.id.clone());
    let cards = session
        .paginated_opportunities()
        .into_iter()
        .map(|o| OpportunityCard::new(o, selected.as_ref() == Some(&o.id)))
        .collect();
    let departments = session.departments().into_iter().map(str::to_owned).collect();

    Ok(DashboardSnapshot {
        catalog_fingerprint: catalog_fingerprint(&**session.catalog())?,
        filters: FilterSurface::from_criteria(&criteria, departments),
        page: PageInfo {
            current_page: session.current_page(),
            total_pages: session.total_pages(),
            page_size: session.config().page_size,
            total_results: session.filtered_len(),
        },
        totals: session.totals(),
        insight: InsightPanel {
            title: session.insight_title(),
            text: session.insight_text().to_owned(),
            is_loading: session.is_loading(),
        },
        branch_panel: session.selected_branch().map(BranchPanel::from),
        cards,
        map,
        criteria,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use opp_core::{BranchStatus, DashboardConfig, StrategicValue};

    #[test]
    fn branch_panel_formats_money_and_clusters() {
        let b = Branch {
            code: "104".parse().unwrap(),
            city: "Cape Town".into(),
            latitude: -33.9,
            longitude: 18.4,
            median_income: 16520.0,
            avg_travel_cost: "R70".into(),
            opportunity_clusters: "Retail-Agriculture".into(),
            strategic_actions: "Bundle".into(),
            status: BranchStatus::HighPotential,
        };
        let p = BranchPanel::from(&b);
        assert_eq!(p.median_income, "R16,520.00");
        assert_eq!(p.clusters, vec!["Retail", "Agriculture"]);
        assert_eq!(p.status, "HIGH POTENTIAL");
    }

    #[test]
    fn card_shows_rounded_penetration() {
        let o = Opportunity {
            id: "x".parse().unwrap(),
            name: "X".into(),
            department: "Mining".into(),
            branch_code: "1".parse().unwrap(),
            employees: "100-200".into(),
            max_employees: 200,
            current_penetration: 31,
            strategic_value: StrategicValue::High,
            distance: 12.0,
            latitude: 0.0,
            longitude: 0.0,
        };
        let c = OpportunityCard::new(&o, true);
        assert_eq!(c.penetration_percent, 16);
        assert_eq!(c.tone, Tone::Warning);
        assert_eq!(c.distance, "12km away");
        assert!(c.selected);
    }

    #[test]
    fn diagnostics_token_label() {
        let d = Diagnostics::new(&DashboardConfig::default());
        assert_eq!(d.token_label(), "Missing");
        let d = Diagnostics::new(&DashboardConfig { access_token: Some("pk".into()), ..Default::default() });
        assert_eq!(d.token_label(), "Set");
        assert_eq!(d.page_size, 6);
    }
}
