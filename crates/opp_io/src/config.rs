//! crates/opp_io/src/config.rs
//! Dashboard config loading: optional JSON file, then environment overrides,
//! then domain validation.

use std::path::Path;

use opp_core::DashboardConfig;

use crate::loader::read_text_with_limits;
use crate::IoResult;

/// Environment variable that supplies the map access token.
pub const TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Load config from `path` (defaults when `None`) and apply the process environment.
pub fn load_config(path: Option<&Path>) -> IoResult<DashboardConfig> {
    load_config_with_env(path, |k| std::env::var(k).ok())
}

/// Same as `load_config` with an injectable environment lookup.
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> IoResult<DashboardConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match path {
        Some(p) => serde_json::from_str::<DashboardConfig>(&read_text_with_limits(p)?)?,
        None => DashboardConfig::default(),
    };
    if let Some(token) = env(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
        tracing::debug!("access token taken from {}", TOKEN_ENV);
        cfg.access_token = Some(token);
    }
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IoError;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file() {
        let cfg = load_config_with_env(None, no_env).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn env_token_overrides_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"page_size": 4, "access_token": "from-file"}}"#).unwrap();
        let cfg = load_config_with_env(Some(f.path()), |k| {
            (k == TOKEN_ENV).then(|| "pk.env".to_string())
        })
        .unwrap();
        assert_eq!(cfg.page_size, 4);
        assert_eq!(cfg.token(), Some("pk.env"));

        let cfg = load_config_with_env(Some(f.path()), |_| Some("   ".into())).unwrap();
        assert_eq!(cfg.token(), Some("from-file"));
    }

    #[test]
    fn invalid_domain_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"page_size": 0}}"#).unwrap();
        let err = load_config_with_env(Some(f.path()), no_env).unwrap_err();
        assert!(matches!(err, IoError::Invalid(_)));

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"pageSize": 3}}"#).unwrap();
        assert!(matches!(load_config_with_env(Some(f.path()), no_env), Err(IoError::Json { .. })));
    }
}
