//! crates/opp_cli/src/main.rs
//!
//! `opp` binary: exit codes, typed error mapping, logging setup, and the
//! subcommand runners. Everything is offline; the map is driven through the
//! recording renderer so marker and camera effects show up in snapshots.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const MAP: i32 = 5;
}

use std::fmt;
use std::path::Path;
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Cli, Command, InputArgs, ViewArgs};
use opp_core::{BranchSelection, DashboardConfig, DistanceBin, EmployeeBin, FilterUpdate, OpportunityId};
use opp_io::{
    canonical_json, demo_catalog, load_catalog, load_config, unique_departments, CatalogProvider, IoError,
    SharedCatalog,
};
use opp_map::{MapController, RecordingRenderer};
use opp_report::{build_snapshot, DashboardSnapshot, Diagnostics, MapSummary, ReportError};
use opp_session::DashboardSession;
use tracing_subscriber::EnvFilter;

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Catalog/config shape or domain failures, bad ids
    Validation(String),
    /// Read/write/path/limits
    Io(String),
    /// Map could not become ready while `--require-map` was set
    Map(String),
    /// Snapshot build or renderer output
    Render(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Map(m) => write!(f, "map: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let cli = match parse_cli() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("opp: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_tracing(cli.input().verbose);

    let rc = match run(&cli) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("opp: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// Logs go to stderr. `--verbose` forces debug; otherwise RUST_LOG, default warn.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), MainError> {
    match &cli.command {
        Command::View(v) => run_view(v),
        Command::Departments(i) => run_departments(i),
        Command::Branches(i) => run_branches(i),
        Command::Diagnostics(i) => run_diagnostics(i),
    }
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Map(_) => MAP,
        MainError::Render(_) => IO,
    }
}

/// Translate opp_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { .. } | IoError::Invalid(_) => MainError::Validation(e.to_string()),
        IoError::Path(_) | IoError::Limit(_) => MainError::Io(e.to_string()),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    match e {
        ReportError::Io(io) => map_io_err(io),
        other => MainError::Render(other.to_string()),
    }
}

/* --------------------------------- Inputs --------------------------------- */

fn load_inputs(input: &InputArgs) -> Result<(SharedCatalog, DashboardConfig), MainError> {
    let catalog = match &input.catalog {
        Some(p) => load_catalog(p).map_err(map_io_err)?,
        None => {
            tracing::debug!("no --catalog given, using the demo catalog");
            demo_catalog().map_err(map_io_err)?
        }
    };
    let config = load_config(input.config.as_deref()).map_err(map_io_err)?;
    let shared: SharedCatalog = catalog.shared();
    Ok((shared, config))
}

/* ---------------------------------- View ---------------------------------- */

fn run_view(a: &ViewArgs) -> Result<(), MainError> {
    let (catalog, config) = load_inputs(&a.input)?;
    let mut session = DashboardSession::new(catalog, config);

    // Branch first: choosing a concrete branch clears the search term.
    session.select_branch(BranchSelection::from_key(&a.branch));
    if !a.departments.is_empty() {
        session.set_filter_field(FilterUpdate::Departments(a.departments.iter().cloned().collect()));
    }
    session.set_filter_field(FilterUpdate::EmployeeBin(EmployeeBin::from_key(&a.employees)));
    session.set_filter_field(FilterUpdate::DistanceBin(DistanceBin::from_key(&a.distance)));
    if let Some(term) = &a.search {
        session.set_filter_field(FilterUpdate::SearchTerm(term.clone()));
    }
    let page = session.set_page(a.page);
    if page != a.page {
        tracing::info!(requested = a.page, page, "page clamped");
    }
    if let Some(raw) = &a.select {
        let id: OpportunityId = raw
            .parse()
            .map_err(|e| MainError::Validation(format!("--select {raw}: {e}")))?;
        if !session.select_opportunity(Some(id)) {
            tracing::warn!("--select {} is not in the filtered set", raw);
        }
    }
    // A one-shot run never waits out the debounce.
    session.flush();

    let mut map = MapController::mount(
        Ok(RecordingRenderer::new()),
        session.config(),
        "map",
        session.selected_branch(),
    );
    let report = session.sync_map(&mut map);
    if a.require_map {
        if let Some(msg) = map.error_message() {
            return Err(MainError::Map(msg.to_owned()));
        }
    }
    let summary = MapSummary::from_controller(&map, Some(report));
    let snapshot = build_snapshot(&session, Some(summary)).map_err(map_report_err)?;

    if a.json {
        print_json(&snapshot)?;
    } else if !a.input.quiet {
        print_view(&snapshot);
    }
    maybe_render_snapshots(a, &snapshot)
}

fn print_view(s: &DashboardSnapshot) {
    println!("{}", s.insight.title);
    println!("{}", s.insight.text);
    println!(
        "Results: {} (page {}/{})",
        s.page.total_results, s.page.current_page, s.page.total_pages
    );
    for c in &s.cards {
        let mark = if c.selected { '*' } else { ' ' };
        println!(
            "{mark} {:<10} {:<32} {:<14} {:>3}% {}",
            c.id, c.name, c.department, c.penetration_percent, c.distance
        );
    }
    if let Some(b) = &s.branch_panel {
        println!("Branch {} {}: {} (median income {})", b.code, b.city, b.status, b.median_income);
    }
    if let Some(m) = &s.map {
        match &m.status {
            opp_map::MapStatus::Failed(msg) => println!("Map unavailable: {msg}"),
            _ => println!("Map: {} markers", m.markers),
        }
    }
}

#[cfg(feature = "report-json")]
fn print_json(snapshot: &DashboardSnapshot) -> Result<(), MainError> {
    println!("{}", opp_report::render_json_pretty(snapshot).map_err(map_report_err)?);
    Ok(())
}

#[cfg(not(feature = "report-json"))]
fn print_json(_: &DashboardSnapshot) -> Result<(), MainError> {
    Err(MainError::Render("json renderer not enabled (build with feature `report-json`)".into()))
}

fn maybe_render_snapshots(a: &ViewArgs, snapshot: &DashboardSnapshot) -> Result<(), MainError> {
    if a.render.is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(&a.out)
        .map_err(|e| MainError::Io(format!("mkdir {}: {e}", a.out.display())))?;
    for fmt in &a.render {
        match fmt.as_str() {
            "json" => render_json_snapshot(snapshot, &a.out)?,
            "html" => render_html_snapshot(snapshot, &a.out)?,
            other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
        }
        if !a.input.quiet {
            eprintln!("view: wrote snapshot.{fmt} to {}", a.out.display());
        }
    }
    Ok(())
}

#[cfg(feature = "report-json")]
fn render_json_snapshot(snapshot: &DashboardSnapshot, out_dir: &Path) -> Result<(), MainError> {
    let json = opp_report::render_json(snapshot).map_err(map_report_err)?;
    canonical_json::write_bytes_atomic(&out_dir.join("snapshot.json"), json.as_bytes())
        .map_err(|e| MainError::Io(format!("write snapshot.json: {e}")))
}

#[cfg(not(feature = "report-json"))]
fn render_json_snapshot(_: &DashboardSnapshot, _: &Path) -> Result<(), MainError> {
    Err(MainError::Render("json renderer not enabled (build with feature `report-json`)".into()))
}

#[cfg(feature = "report-html")]
fn render_html_snapshot(snapshot: &DashboardSnapshot, out_dir: &Path) -> Result<(), MainError> {
    let html = opp_report::render_html(snapshot);
    canonical_json::write_bytes_atomic(&out_dir.join("snapshot.html"), html.as_bytes())
        .map_err(|e| MainError::Io(format!("write snapshot.html: {e}")))
}

#[cfg(not(feature = "report-html"))]
fn render_html_snapshot(_: &DashboardSnapshot, _: &Path) -> Result<(), MainError> {
    Err(MainError::Render("html renderer not enabled (build with feature `report-html`)".into()))
}

/* ------------------------------- Listings --------------------------------- */

fn run_departments(input: &InputArgs) -> Result<(), MainError> {
    let (catalog, _) = load_inputs(input)?;
    for d in unique_departments(&*catalog) {
        println!("{d}");
    }
    Ok(())
}

fn run_branches(input: &InputArgs) -> Result<(), MainError> {
    let (catalog, _) = load_inputs(input)?;
    for b in catalog.branches() {
        println!("{}\t{}\t{}", b.code, b.city, b.status.token());
    }
    Ok(())
}

fn run_diagnostics(input: &InputArgs) -> Result<(), MainError> {
    let (_, config) = load_inputs(input)?;
    let d = Diagnostics::new(&config);
    println!("Access token: {}", d.token_label());
    println!("Environment: {}", d.environment);
    println!("Page size: {}", d.page_size);
    println!("Insight debounce: {} ms", d.debounce_ms);
    Ok(())
}
