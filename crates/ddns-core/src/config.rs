//! Configuration for the DDNS client
//!
//! All configuration comes from environment variables, read once at startup.
//! The loader is a fail-fast gate: nothing else runs if a required value is
//! missing.

use std::env;

use crate::error::{Error, Result};

/// TSIG key identifier
pub const ENV_KEY_NAME: &str = "DDNS_KEY_NAME";
/// TSIG secret, base64 encoded
pub const ENV_KEY_SECRET: &str = "DDNS_KEY_SECRET";
/// TSIG algorithm name (optional)
pub const ENV_KEY_ALGORITHM: &str = "DDNS_KEY_ALGORITHM";
/// Zone to operate on
pub const ENV_DOMAIN: &str = "DDNS_DOMAIN";
/// Server accepting UPDATE and AXFR
pub const ENV_SERVER: &str = "DDNS_SERVER";
/// Server port (optional)
pub const ENV_SERVER_PORT: &str = "DDNS_SERVER_PORT";
/// Log level (optional)
pub const ENV_LOG_LEVEL: &str = "DDNS_LOG_LEVEL";
/// Run mode, `dry-run` or `live` (optional)
pub const ENV_MODE: &str = "DDNS_MODE";

/// Message emitted when the TSIG credentials are incomplete
pub const MISSING_KEY_MESSAGE: &str = "DDNS_KEY_NAME or DDNS_KEY_SECRET is not defined.";
/// Message emitted when the zone or server is missing
pub const MISSING_TARGET_MESSAGE: &str = "DDNS_DOMAIN or DDNS_SERVER is not defined.";

/// Default DNS port
pub const DEFAULT_PORT: u16 = 53;

/// Supported TSIG MAC algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyAlgorithm {
    /// HMAC-SHA256 (BIND and dnspython default)
    #[default]
    HmacSha256,
    /// HMAC-SHA384
    HmacSha384,
    /// HMAC-SHA512
    HmacSha512,
}

impl KeyAlgorithm {
    /// Parse an algorithm name as written in BIND key files
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().trim_end_matches('.').to_lowercase().as_str() {
            "hmac-sha256" => Ok(Self::HmacSha256),
            "hmac-sha384" => Ok(Self::HmacSha384),
            "hmac-sha512" => Ok(Self::HmacSha512),
            other => Err(Error::config(format!(
                "{ENV_KEY_ALGORITHM} '{other}' is not supported. \
                Supported algorithms: hmac-sha256, hmac-sha384, hmac-sha512"
            ))),
        }
    }
}

/// Run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Send UPDATE messages to the server
    #[default]
    Live,
    /// Log UPDATE messages instead of sending them
    DryRun,
}

/// Client configuration loaded from the environment
#[derive(Clone)]
pub struct DdnsConfig {
    /// TSIG key name
    pub key_name: String,
    /// TSIG secret (base64)
    /// ⚠️ NEVER log this value
    pub key_secret: String,
    /// TSIG algorithm
    pub key_algorithm: KeyAlgorithm,
    /// Zone name
    pub domain: String,
    /// Server host name or address
    pub server: String,
    /// Server port
    pub port: u16,
    /// Log level name
    pub log_level: String,
    /// Run mode
    pub mode: Mode,
}

// Custom Debug implementation that hides the key secret
impl std::fmt::Debug for DdnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DdnsConfig")
            .field("key_name", &self.key_name)
            .field("key_secret", &"<REDACTED>")
            .field("key_algorithm", &self.key_algorithm)
            .field("domain", &self.domain)
            .field("server", &self.server)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("mode", &self.mode)
            .finish()
    }
}

impl DdnsConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as missing. The credential check runs before
    /// the zone/server check.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (Some(key_name), Some(key_secret)) = (get(ENV_KEY_NAME), get(ENV_KEY_SECRET)) else {
            return Err(Error::config(MISSING_KEY_MESSAGE));
        };

        let (Some(domain), Some(server)) = (get(ENV_DOMAIN), get(ENV_SERVER)) else {
            return Err(Error::config(MISSING_TARGET_MESSAGE));
        };

        let key_algorithm = match get(ENV_KEY_ALGORITHM) {
            Some(name) => KeyAlgorithm::parse(&name)?,
            None => KeyAlgorithm::default(),
        };

        let port = match get(ENV_SERVER_PORT) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let mode = match get(ENV_MODE).map(|m| m.to_lowercase()) {
            Some(m) if m == "dry-run" => Mode::DryRun,
            Some(m) if m == "live" => Mode::Live,
            Some(other) => {
                return Err(Error::config(format!(
                    "{ENV_MODE} '{other}' is not valid. Valid modes: live, dry-run"
                )));
            }
            None => Mode::default(),
        };

        let config = Self {
            key_name: key_name.trim().to_string(),
            key_secret: key_secret.trim().to_string(),
            key_algorithm,
            domain: domain.trim().to_string(),
            server: server.trim().to_string(),
            port,
            log_level: get(ENV_LOG_LEVEL).unwrap_or_else(|| "warn".to_string()),
            mode,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate value formats that the loader cannot check by presence alone
    pub fn validate(&self) -> Result<()> {
        if self.domain.is_empty() || self.server.is_empty() {
            return Err(Error::config(MISSING_TARGET_MESSAGE));
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(Error::config(format!(
                    "{ENV_LOG_LEVEL} '{}' is not valid. \
                    Valid levels: trace, debug, info, warn, error",
                    self.log_level
                )));
            }
        }

        Ok(())
    }

    /// Whether UPDATE messages should only be logged
    pub fn is_dry_run(&self) -> bool {
        self.mode == Mode::DryRun
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(Error::config(format!(
            "{ENV_SERVER_PORT} must be a port number between 1 and 65535. Got: {raw}"
        ))),
        Ok(port) => Ok(port),
    }
}
