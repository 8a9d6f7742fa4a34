//! TSIG keyring
//!
//! Associates a key name with its decoded secret and MAC algorithm, and
//! produces the [`TSigner`] that signs every outgoing message.

use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hickory_proto::dnssec::rdata::tsig::TsigAlgorithm;
use hickory_proto::dnssec::tsig::TSigner;
use hickory_proto::rr::Name;

use crate::config::KeyAlgorithm;
use crate::error::{Error, Result};

/// Allowed clock skew between client and server, in seconds
pub const DEFAULT_FUDGE: u16 = 300;

/// A single TSIG key
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the secret.
#[derive(Clone)]
pub struct Keyring {
    key_name: Name,
    algorithm: KeyAlgorithm,
    /// Decoded secret
    /// ⚠️ NEVER log this value
    secret: Vec<u8>,
}

impl std::fmt::Debug for Keyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyring")
            .field("key_name", &self.key_name)
            .field("algorithm", &self.algorithm)
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

impl Keyring {
    /// Build a keyring from a key name and a base64 secret
    pub fn from_text(key_name: &str, secret: &str, algorithm: KeyAlgorithm) -> Result<Self> {
        let mut key_name = Name::from_str(key_name)
            .map_err(|e| Error::keyring(format!("invalid key name '{key_name}': {e}")))?;
        key_name.set_fqdn(true);

        // Never include the secret itself in the error.
        let secret = STANDARD
            .decode(secret.trim())
            .map_err(|e| Error::keyring(format!("secret is not valid base64: {e}")))?;

        if secret.is_empty() {
            return Err(Error::keyring("secret is empty"));
        }

        Ok(Self {
            key_name,
            algorithm,
            secret,
        })
    }

    /// The key name as known to the server
    pub fn key_name(&self) -> &Name {
        &self.key_name
    }

    /// The MAC algorithm
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    /// Build a signer for outgoing messages
    pub fn signer(&self) -> Result<TSigner> {
        let algorithm = match self.algorithm {
            KeyAlgorithm::HmacSha256 => TsigAlgorithm::HmacSha256,
            KeyAlgorithm::HmacSha384 => TsigAlgorithm::HmacSha384,
            KeyAlgorithm::HmacSha512 => TsigAlgorithm::HmacSha512,
        };

        TSigner::new(
            self.secret.clone(),
            algorithm,
            self.key_name.clone(),
            DEFAULT_FUDGE,
        )
        .map_err(|e| Error::keyring(e.to_string()))
    }
}
