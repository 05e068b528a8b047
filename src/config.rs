use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

/// AppConfig
///
/// Holds the configuration shared by both servers. It is immutable once loaded
/// and is pulled into handlers through `FromRef`, the same way the rest of the
/// `AppState` components are.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the log format.
    pub env: Env,
    // When set, 500 responses carry the panic message instead of a generic one.
    pub debug: bool,
    // Bind address of the SupplyChain API service.
    pub api_addr: SocketAddr,
    // Bind address of the role login service.
    pub login_addr: SocketAddr,
    // Directory holding login.html and the dashboard pages.
    pub static_dir: PathBuf,
    // Explicit CORS allow-list. Empty means any origin (without credentials).
    pub cors_origins: Vec<String>,
}

/// Env
///
/// Runtime context. `Local` logs pretty output for humans, `Production` emits JSON.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Default for AppConfig {
    /// Non-panicking defaults, used by tests to scaffold state without touching
    /// the process environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            debug: false,
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            login_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            static_dir: PathBuf::from("static"),
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every setting from environment variables, falling back to the
    /// defaults above. Malformed values fail fast with a `ConfigError` rather
    /// than being silently replaced.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let debug = match env::var("APP_DEBUG") {
            Ok(value) => parse_bool("APP_DEBUG", &value)?,
            Err(_) => defaults.debug,
        };

        let api_addr = bind_addr("API_HOST", "API_PORT", defaults.api_addr)?;
        let login_addr = bind_addr("LOGIN_HOST", "LOGIN_PORT", defaults.login_addr)?;

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let cors_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            env,
            debug,
            api_addr,
            login_addr,
            static_dir,
            cors_origins,
        })
    }
}

fn bind_addr(
    host_var: &'static str,
    port_var: &'static str,
    default: SocketAddr,
) -> Result<SocketAddr, ConfigError> {
    let ip = match env::var(host_var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var: host_var,
            expected: "IP address",
            value,
        })?,
        Err(_) => default.ip(),
    };

    let port = match env::var(port_var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var: port_var,
            expected: "port number",
            value,
        })?,
        Err(_) => default.port(),
    };

    Ok(SocketAddr::new(ip, port))
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "boolean",
            value: value.to_string(),
        }),
    }
}
