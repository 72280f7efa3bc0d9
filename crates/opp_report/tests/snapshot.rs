//! Snapshot building and rendering over the demo catalog.

use opp_core::{BranchSelection, DashboardConfig};
use opp_io::demo_catalog;
use opp_map::{MapController, RecordingRenderer};
use opp_report::{build_snapshot, render_html, render_json, MapSummary};
use opp_session::{DashboardSession, ManualClock};

fn session() -> DashboardSession<ManualClock> {
    let catalog = demo_catalog().unwrap().shared();
    DashboardSession::with_clock(catalog, DashboardConfig::default(), ManualClock::new())
}

#[test]
fn json_is_canonical_and_repeatable() {
    let mut s = session();
    s.flush();
    let a = render_json(&build_snapshot(&s, None).unwrap()).unwrap();
    let b = render_json(&build_snapshot(&s, None).unwrap()).unwrap();
    assert_eq!(a, b);
    let v: serde_json::Value = serde_json::from_str(&a).unwrap();
    assert_eq!(v["page"]["totalResults"], 24);
    assert_eq!(v["page"]["totalPages"], 4);
    assert_eq!(v["cards"].as_array().unwrap().len(), 6);
    assert_eq!(v["insight"]["title"], "Analysis for National View");
    assert_eq!(v["catalogFingerprint"].as_str().unwrap().len(), 64);
    assert!(v["branchPanel"].is_null());
}

#[test]
fn branch_snapshot_has_panel_and_map() {
    let mut s = session();
    s.select_branch(BranchSelection::from_key("104"));
    s.flush();
    let config = DashboardConfig { access_token: Some("pk.test".into()), ..Default::default() };
    let mut map = MapController::mount(Ok(RecordingRenderer::new()), &config, "map", s.selected_branch());
    let report = s.sync_map(&mut map);
    let snap = build_snapshot(&s, Some(MapSummary::from_controller(&map, Some(report)))).unwrap();

    let panel = snap.branch_panel.as_ref().unwrap();
    assert_eq!(panel.city, "Cape Town");
    assert_eq!(panel.median_income, "R16,520.00");
    assert_eq!(snap.page.total_results, 5);
    assert!(snap.filters.distance_enabled);
    // five branches plus five Cape Town opportunities
    assert_eq!(snap.map.as_ref().unwrap().markers, 10);

    let html = render_html(&snap);
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("<h1>Analysis for Cape Town</h1>"));
    assert!(html.contains("V&amp;A Waterfront Retail"));
    assert!(html.contains("10 markers on map"));
}
