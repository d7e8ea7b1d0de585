use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like User-Agent; some sites serve different markup to unknown clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Global configuration loaded from `~/.config/navicon/config.toml`.
///
/// Loaded once at startup and passed down explicitly; nothing reads it from
/// ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NaviconConfig {
    /// User-Agent sent with page and icon requests.
    pub user_agent: String,
    /// Total time budget for a single GET, in seconds.
    pub fetch_timeout_secs: u64,
    /// Connect timeout for a single GET, in seconds.
    pub connect_timeout_secs: u64,
    /// Icon bodies smaller than this are treated as error pages and rejected.
    pub min_icon_bytes: usize,
    /// Maximum number of catalog entries processed by one batch run.
    pub batch_limit: u32,
    /// Fixed pause between batch items, in milliseconds.
    pub batch_delay_ms: u64,
    /// Route prefix under which stored icons are served (`{icon_route}/{id}`).
    pub icon_route: String,
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Database file; defaults to `~/.local/state/navicon/navicon.db`.
    pub database_path: Option<PathBuf>,
}

impl Default for NaviconConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_secs: 10,
            connect_timeout_secs: 5,
            min_icon_bytes: 100,
            batch_limit: 50,
            batch_delay_ms: 500,
            icon_route: "/api/icons".to_string(),
            listen_addr: "127.0.0.1:3000".to_string(),
            database_path: None,
        }
    }
}

impl NaviconConfig {
    /// At least one second; libcurl reads zero as "no timeout".
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Icon route with any trailing slash removed, so `{route}/{id}` is well formed.
    pub fn icon_route(&self) -> &str {
        let trimmed = self.icon_route.trim_end_matches('/');
        if trimmed.is_empty() {
            "/api/icons"
        } else {
            trimmed
        }
    }

    /// Rejects values the server cannot mount.
    pub fn validate(&self) -> Result<()> {
        check_icon_route(self.icon_route())
    }
}

/// An icon route must be an absolute path of literal segments.
pub fn check_icon_route(route: &str) -> Result<()> {
    if !route.starts_with('/') {
        anyhow::bail!("icon_route must start with '/': {route:?}");
    }
    if route.contains(['{', '}', '*']) || route.split('/').any(|seg| seg.starts_with(':')) {
        anyhow::bail!("icon_route must not contain path parameters: {route:?}");
    }
    if route.chars().any(|c| c.is_whitespace()) {
        anyhow::bail!("icon_route must not contain whitespace: {route:?}");
    }
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("navicon")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NaviconConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NaviconConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: NaviconConfig = toml::from_str(&data)?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = NaviconConfig::default();
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.min_icon_bytes, 100);
        assert_eq!(cfg.batch_limit, 50);
        assert_eq!(cfg.batch_delay(), Duration::from_millis(500));
        assert_eq!(cfg.icon_route(), "/api/icons");
        assert!(cfg.database_path.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = NaviconConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: NaviconConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.min_icon_bytes, cfg.min_icon_bytes);
        assert_eq!(parsed.batch_limit, cfg.batch_limit);
        assert_eq!(parsed.listen_addr, cfg.listen_addr);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            batch_limit = 5
            batch_delay_ms = 0
            database_path = "/tmp/navicon-test.db"
        "#;
        let cfg: NaviconConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.batch_limit, 5);
        assert_eq!(cfg.batch_delay(), Duration::ZERO);
        assert_eq!(
            cfg.database_path.as_deref(),
            Some(std::path::Path::new("/tmp/navicon-test.db"))
        );
        assert_eq!(cfg.min_icon_bytes, 100);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn icon_route_trailing_slash_trimmed() {
        let cfg = NaviconConfig {
            icon_route: "/static/icons/".to_string(),
            ..NaviconConfig::default()
        };
        assert_eq!(cfg.icon_route(), "/static/icons");

        let empty = NaviconConfig {
            icon_route: "/".to_string(),
            ..NaviconConfig::default()
        };
        assert_eq!(empty.icon_route(), "/api/icons");
    }

    #[test]
    fn zero_timeouts_are_clamped() {
        let cfg = NaviconConfig {
            fetch_timeout_secs: 0,
            connect_timeout_secs: 0,
            ..NaviconConfig::default()
        };
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(1));
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn icon_route_validation() {
        assert!(NaviconConfig::default().validate().is_ok());
        assert!(check_icon_route("/static/icons").is_ok());
        assert!(check_icon_route("icons").is_err());
        assert!(check_icon_route("/icons/{id}").is_err());
        assert!(check_icon_route("/icons/:id").is_err());
        assert!(check_icon_route("/icons/*rest").is_err());
        assert!(check_icon_route("/my icons").is_err());

        let cfg = NaviconConfig {
            icon_route: "icons/".to_string(),
            ..NaviconConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
