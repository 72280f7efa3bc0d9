//! crates/opp_cli/src/args.rs
//!
//! Offline CLI surface: subcommands, shared input flags, and the local-path
//! checks applied before anything is loaded.
//!
//! Rules:
//! - No networked paths (reject any scheme:// like http/https/file)
//! - `--catalog` omitted → built-in demo catalog
//! - `--config` omitted → defaults, then `MAPBOX_ACCESS_TOKEN`
//! - Output: `--out` dir, `--render [json|html]*`

use clap::{Args, Parser, Subcommand};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "opp",
    disable_help_subcommand = true,
    about = "Offline sales-opportunity dashboard: filter, rank, paginate and snapshot"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Apply filters, settle the insight, and print (or render) one dashboard page.
    View(ViewArgs),
    /// List the distinct departments in catalog order.
    Departments(InputArgs),
    /// List branches with their status.
    Branches(InputArgs),
    /// Show runtime diagnostics (token presence, environment, tunables).
    Diagnostics(InputArgs),
}

/// Flags shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct InputArgs {
    /// Catalog JSON path (branches + opportunities). Omit to use the demo catalog.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Dashboard config JSON path.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,
    /// Debug-level logs on stderr (overrides RUST_LOG).
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Branch code, or `All` for the national view.
    #[arg(long, default_value = "All")]
    pub branch: String,
    /// Department constraint; repeat to allow several.
    #[arg(long = "department")]
    pub departments: Vec<String>,
    #[arg(long, default_value = "All", value_parser = ["All", "Small", "Medium", "Large"])]
    pub employees: String,
    /// Ignored in the national view.
    #[arg(long, default_value = "All", value_parser = ["All", "Close", "Nearby", "Far"])]
    pub distance: String,
    /// Case-insensitive name search.
    #[arg(long)]
    pub search: Option<String>,
    /// 1-based page; clamped to the available pages.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Opportunity id to select (must be in the filtered set).
    #[arg(long)]
    pub select: Option<String>,

    /// Output directory for rendered snapshots (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Snapshot format(s) to write. Choose up to 2 (json, html). Omit to skip.
    #[arg(long, value_parser = ["json", "html"], num_args = 1..=2)]
    pub render: Vec<String>,
    /// Print the snapshot as indented JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,
    /// Treat a map failure (missing token, init error) as fatal.
    #[arg(long)]
    pub require_map: bool,
}

impl Cli {
    pub fn input(&self) -> &InputArgs {
        match &self.command {
            Command::View(v) => &v.input,
            Command::Departments(i) | Command::Branches(i) | Command::Diagnostics(i) => i,
        }
    }
}

/// Errors surfaced by argument validation. Messages stay short and stable.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs.
pub fn parse_and_validate() -> Result<Cli, CliError> {
    let mut cli = Cli::parse();
    validate(&mut cli)?;
    Ok(cli)
}

/// Scheme checks for every path flag, existence checks for inputs, then
/// normalization to absolute paths.
pub fn validate(cli: &mut Cli) -> Result<(), CliError> {
    if let Command::View(v) = &mut cli.command {
        ensure_local_path(&v.out)?;
        v.out = normalize_path(&v.out);
    }
    let input = match &mut cli.command {
        Command::View(v) => &mut v.input,
        Command::Departments(i) | Command::Branches(i) | Command::Diagnostics(i) => i,
    };
    if let Some(p) = &input.catalog {
        ensure_local_exists(p, "--catalog")?;
    }
    if let Some(p) = &input.config {
        ensure_local_exists(p, "--config")?;
    }
    input.catalog = input.catalog.take().map(|p| normalize_path(&p));
    input.config = input.config.take().map(|p| normalize_path(&p));
    Ok(())
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    opp_io::looks_like_url_strict(&lower)
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort absolute path; falls back to CWD-relative when the path does not exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

/* ---------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("HTTPS://x/y.json")).is_err());
        assert!(ensure_local_path(Path::new("/tmp/catalog.json")).is_ok());
        assert!(ensure_local_path(Path::new("out")).is_ok());
    }

    #[test]
    fn view_defaults() {
        let cli = Cli::try_parse_from(["opp", "view"]).unwrap();
        let Command::View(v) = cli.command else { panic!("expected view") };
        assert_eq!(v.branch, "All");
        assert_eq!(v.employees, "All");
        assert_eq!(v.page, 1);
        assert!(v.render.is_empty());
        assert!(!v.require_map);
    }

    #[test]
    fn view_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "opp", "view", "--branch", "104", "--department", "Retail", "--department", "Mining",
            "--render", "json", "html", "--quiet",
        ])
        .unwrap();
        assert!(cli.input().quiet);
        let Command::View(v) = cli.command else { panic!("expected view") };
        assert_eq!(v.departments, vec!["Retail", "Mining"]);
        assert_eq!(v.render, vec!["json", "html"]);
    }

    #[test]
    fn unknown_bin_key_is_a_usage_error() {
        assert!(Cli::try_parse_from(["opp", "view", "--employees", "Huge"]).is_err());
        assert!(Cli::try_parse_from(["opp", "view", "--render", "pdf"]).is_err());
    }

    #[test]
    fn validate_rejects_url_catalog_and_missing_file() {
        let mut cli = Cli::try_parse_from(["opp", "branches", "--catalog", "https://host/c.json"]).unwrap();
        assert!(matches!(validate(&mut cli), Err(CliError::NonLocalPath(_))));

        let mut cli = Cli::try_parse_from(["opp", "branches", "--catalog", "no/such/catalog.json"]).unwrap();
        assert!(matches!(validate(&mut cli), Err(CliError::NotFound(_))));
    }

    #[test]
    fn validate_normalizes_out_dir() {
        let mut cli = Cli::try_parse_from(["opp", "view", "--out", "does/not/exist"]).unwrap();
        validate(&mut cli).unwrap();
        let Command::View(v) = cli.command else { panic!("expected view") };
        assert!(v.out.is_absolute());
    }
}
