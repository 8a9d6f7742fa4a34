//! Invocation context shared by every command

use std::str::FromStr;

use hickory_proto::rr::Name;

use crate::config::DdnsConfig;
use crate::error::{Error, Result};
use crate::keyring::Keyring;

/// Zone, server and keyring for one invocation
///
/// Built once from [`DdnsConfig`] and passed by reference to the executor.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    zone: Name,
    server: String,
    port: u16,
    keyring: Keyring,
}

impl InvocationContext {
    /// Create a context from its parts
    pub fn new(zone: Name, server: impl Into<String>, port: u16, keyring: Keyring) -> Result<Self> {
        let server = server.into();
        if zone.is_root() || server.is_empty() {
            return Err(Error::config(crate::config::MISSING_TARGET_MESSAGE));
        }

        Ok(Self {
            zone,
            server,
            port,
            keyring,
        })
    }

    /// Build the context from loaded configuration
    pub fn from_config(config: &DdnsConfig) -> Result<Self> {
        let keyring = Keyring::from_text(&config.key_name, &config.key_secret, config.key_algorithm)?;
        let zone = parse_zone(&config.domain)?;

        Self::new(zone, config.server.clone(), config.port, keyring)
    }

    /// The zone all updates and transfers are scoped to
    pub fn zone(&self) -> &Name {
        &self.zone
    }

    /// Server host name or address
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The TSIG keyring
    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }
}

/// Parse a zone name, always treating it as fully qualified
pub fn parse_zone(domain: &str) -> Result<Name> {
    let mut zone = Name::from_str(domain.trim())
        .map_err(|e| Error::config(format!("DDNS_DOMAIN '{domain}' is not a valid name: {e}")))?;
    zone.set_fqdn(true);
    Ok(zone)
}
