//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chatwidget/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub send_delay_ms: Option<u64>,
    pub wide_min_columns: Option<u16>,
    pub greeting: Option<String>,
    pub title: Option<String>,
    pub open_on_start: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SEND_DELAY_MS: u64 = 600;
/// Terminals wider than this submit on plain Enter.
pub const DEFAULT_WIDE_MIN_COLUMNS: u16 = 100;
pub const DEFAULT_GREETING: &str = "Hi there! How can I help you today?";
pub const DEFAULT_TITLE: &str = "Chatbot";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub send_delay: Duration,
    pub wide_min_columns: u16,
    pub greeting: String,
    pub title: String,
    pub open_on_start: bool,
}

/// Values taken from command-line flags (None/false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub send_delay_ms: Option<u64>,
    pub open: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.chatwidget/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatwidget").join("config.toml"))
}

/// Load config from `~/.chatwidget/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WidgetConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WidgetConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WidgetConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(WidgetConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: WidgetConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Chat widget configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# base_url = "http://localhost:8000"   # Or set CHATWIDGET_BASE_URL
# request_timeout_secs = 30

# [ui]
# send_delay_ms = 600                  # Or set CHATWIDGET_SEND_DELAY_MS
# wide_min_columns = 100               # Enter submits when the terminal is wider than this
# greeting = "Hi there! How can I help you today?"
# title = "Chatbot"
# open_on_start = false
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WidgetConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("CHATWIDGET_BASE_URL").ok())
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Send delay: CLI → env → config → default
    let send_delay_ms = cli
        .send_delay_ms
        .or_else(|| {
            std::env::var("CHATWIDGET_SEND_DELAY_MS")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(ms) => Some(ms),
                    Err(e) => {
                        warn!("Ignoring CHATWIDGET_SEND_DELAY_MS={:?}: {}", v, e);
                        None
                    }
                })
        })
        .or(config.ui.send_delay_ms)
        .unwrap_or(DEFAULT_SEND_DELAY_MS);

    // A zero timeout would fail every request immediately
    let request_timeout_secs = match config.service.request_timeout_secs {
        Some(0) => {
            warn!(
                "Ignoring request_timeout_secs = 0, using {}s",
                DEFAULT_REQUEST_TIMEOUT_SECS
            );
            DEFAULT_REQUEST_TIMEOUT_SECS
        }
        Some(secs) => secs,
        None => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    ResolvedConfig {
        base_url,
        request_timeout: Duration::from_secs(request_timeout_secs),
        send_delay: Duration::from_millis(send_delay_ms),
        wide_min_columns: config
            .ui
            .wide_min_columns
            .unwrap_or(DEFAULT_WIDE_MIN_COLUMNS),
        greeting: config
            .ui
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        title: config
            .ui
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        open_on_start: cli.open || config.ui.open_on_start.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = WidgetConfig::default();
        assert!(config.service.base_url.is_none());
        assert!(config.ui.send_delay_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = WidgetConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(
            resolved.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(resolved.wide_min_columns, DEFAULT_WIDE_MIN_COLUMNS);
        assert_eq!(resolved.greeting, DEFAULT_GREETING);
        assert_eq!(resolved.title, DEFAULT_TITLE);
        assert!(!resolved.open_on_start);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = WidgetConfig {
            service: ServiceConfig {
                base_url: Some("http://chat.internal:9000".to_string()),
                request_timeout_secs: Some(5),
            },
            ui: UiConfig {
                send_delay_ms: Some(100),
                wide_min_columns: Some(120),
                greeting: Some("Ahoy".to_string()),
                title: Some("Helpdesk".to_string()),
                open_on_start: Some(true),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.request_timeout, Duration::from_secs(5));
        assert_eq!(resolved.wide_min_columns, 120);
        assert_eq!(resolved.greeting, "Ahoy");
        assert_eq!(resolved.title, "Helpdesk");
        assert!(resolved.open_on_start);
    }

    #[test]
    fn test_resolve_zero_timeout_falls_back_to_default() {
        let config = WidgetConfig {
            service: ServiceConfig {
                request_timeout_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(
            resolved.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = WidgetConfig {
            service: ServiceConfig {
                base_url: Some("http://from-config".to_string()),
                ..Default::default()
            },
            ui: UiConfig {
                send_delay_ms: Some(100),
                ..Default::default()
            },
        };
        let cli = CliOverrides {
            base_url: Some("http://from-cli".to_string()),
            send_delay_ms: Some(5),
            open: true,
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.send_delay, Duration::from_millis(5));
        assert!(resolved.open_on_start);
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[service]
base_url = "http://localhost:8000"
request_timeout_secs = 10

[ui]
send_delay_ms = 250
wide_min_columns = 90
greeting = "Hello!"
"#;
        let config: WidgetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.service.base_url.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.service.request_timeout_secs, Some(10));
        assert_eq!(config.ui.send_delay_ms, Some(250));
        assert_eq!(config.ui.wide_min_columns, Some(90));
        assert_eq!(config.ui.greeting.as_deref(), Some("Hello!"));
        assert!(config.ui.title.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[ui]
title = "Support"
"#;
        let config: WidgetConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ui.title.as_deref(), Some("Support"));
        assert!(config.service.base_url.is_none());
        assert!(config.ui.send_delay_ms.is_none());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result: Result<WidgetConfig, _> = toml::from_str("[ui]\nsend_delay_ms = \"soon\"");
        assert!(result.is_err());
    }
}
