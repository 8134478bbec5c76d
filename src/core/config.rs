//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.greeter/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::ServiceKind;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GreeterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub service: Option<ServiceKind>,
    pub render_failures: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HttpConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocalConfig {
    pub latency_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HTTP_BASE_URL: &str = "http://127.0.0.1:4943";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LOCAL_LATENCY_MS: u64 = 300;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub service: ServiceKind,
    pub render_failures: bool,
    pub log_level: LevelFilter,
    pub http_base_url: String,
    pub http_timeout: Duration,
    pub local_latency: Duration,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub service: Option<ServiceKind>,
    pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.greeter/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".greeter").join("config.toml"))
}

/// Load config from `~/.greeter/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GreeterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GreeterConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(GreeterConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<GreeterConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GreeterConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: GreeterConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Greeter Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# service = "local"                  # "local" or "http" (or GREETER_SERVICE)
# render_failures = false            # show "Error: ..." instead of keeping the last greeting
# log_level = "debug"                # written to greeter.log

# [http]
# base_url = "http://127.0.0.1:4943" # Or set GREETER_URL env var
# timeout_ms = 10000

# [local]
# latency_ms = 300                   # simulated round trip
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GreeterConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with(
    config: &GreeterConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Service: CLI → env → config → default
    let service = cli
        .service
        .or_else(|| {
            let raw = env("GREETER_SERVICE")?;
            let parsed = ServiceKind::parse(&raw);
            if parsed.is_none() {
                warn!("Unknown GREETER_SERVICE {:?}, ignoring", raw);
            }
            parsed
        })
        .or(config.general.service)
        .unwrap_or_default();

    // URL: CLI → env → config → default
    let http_base_url = cli
        .url
        .clone()
        .or_else(|| env("GREETER_URL"))
        .or_else(|| config.http.base_url.clone())
        .unwrap_or_else(|| DEFAULT_HTTP_BASE_URL.to_string());

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        service,
        render_failures: config.general.render_failures.unwrap_or(false),
        log_level,
        http_base_url,
        http_timeout: Duration::from_millis(
            config.http.timeout_ms.unwrap_or(DEFAULT_HTTP_TIMEOUT_MS),
        ),
        local_latency: Duration::from_millis(
            config.local.latency_ms.unwrap_or(DEFAULT_LOCAL_LATENCY_MS),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_is_empty() {
        let config = GreeterConfig::default();
        assert!(config.general.service.is_none());
        assert!(config.http.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = GreeterConfig::default();
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert!(!resolved.render_failures);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(
            resolved.http_timeout,
            Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS)
        );
        assert_eq!(
            resolved.local_latency,
            Duration::from_millis(DEFAULT_LOCAL_LATENCY_MS)
        );
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = GreeterConfig {
            general: GeneralConfig {
                service: Some(ServiceKind::Http),
                render_failures: Some(true),
                log_level: Some("warn".to_string()),
            },
            http: HttpConfig {
                base_url: None,
                timeout_ms: Some(2500),
            },
            local: LocalConfig {
                latency_ms: Some(0),
            },
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert!(resolved.render_failures);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.http_timeout, Duration::from_millis(2500));
        assert_eq!(resolved.local_latency, Duration::ZERO);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = GreeterConfig {
            general: GeneralConfig {
                service: Some(ServiceKind::Local),
                ..Default::default()
            },
            http: HttpConfig {
                base_url: Some("http://config:1".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            service: Some(ServiceKind::Http),
            url: Some("http://cli:2".to_string()),
        };
        let resolved = resolve_with(&config, &cli, no_env);
        assert_eq!(resolved.service, ServiceKind::Http);
        assert_eq!(resolved.http_base_url, "http://cli:2");
    }

    fn env_of(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    fn config_with_local_service() -> GreeterConfig {
        GreeterConfig {
            general: GeneralConfig {
                service: Some(ServiceKind::Local),
                ..Default::default()
            },
            http: HttpConfig {
                base_url: Some("http://config:1".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_env_beats_config_file() {
        let env = env_of(&[
            ("GREETER_SERVICE", "HTTP"),
            ("GREETER_URL", "http://env:3"),
        ]);
        let resolved = resolve_with(&config_with_local_service(), &CliOverrides::default(), env);
        assert_eq!(resolved.service, ServiceKind::Http);
        assert_eq!(resolved.http_base_url, "http://env:3");
    }

    #[test]
    fn test_resolve_cli_beats_env() {
        let env = env_of(&[
            ("GREETER_SERVICE", "http"),
            ("GREETER_URL", "http://env:3"),
        ]);
        let cli = CliOverrides {
            service: Some(ServiceKind::Local),
            url: Some("http://cli:2".to_string()),
        };
        let resolved = resolve_with(&config_with_local_service(), &cli, env);
        assert_eq!(resolved.service, ServiceKind::Local);
        assert_eq!(resolved.http_base_url, "http://cli:2");
    }

    #[test]
    fn test_resolve_bad_env_service_falls_through_to_config() {
        let env = env_of(&[("GREETER_SERVICE", "grpc")]);
        let resolved = resolve_with(&config_with_local_service(), &CliOverrides::default(), env);
        assert_eq!(resolved.service, ServiceKind::Local);
        assert_eq!(resolved.http_base_url, "http://config:1");
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = GreeterConfig {
            general: GeneralConfig {
                log_level: Some("chatty".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[general]
service = "http"
render_failures = true
log_level = "info"

[http]
base_url = "http://192.168.1.100:4943"
timeout_ms = 500

[local]
latency_ms = 50
"#;
        let config: GreeterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.service, Some(ServiceKind::Http));
        assert_eq!(config.general.render_failures, Some(true));
        assert_eq!(
            config.http.base_url.as_deref(),
            Some("http://192.168.1.100:4943")
        );
        assert_eq!(config.http.timeout_ms, Some(500));
        assert_eq!(config.local.latency_ms, Some(50));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[local]
latency_ms = 0
"#;
        let config: GreeterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.local.latency_ms, Some(0));
        assert!(config.general.service.is_none());
        assert!(config.http.timeout_ms.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("greeter-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.general.service.is_none());

        // The generated file is all comments, so it parses back to defaults
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.http.base_url.is_none());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# [general]"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("greeter-bad-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\nservice = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
