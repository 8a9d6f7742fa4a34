// # DNS Provider Trait
//
// Defines the interface for delivering UPDATE messages and zone transfers to
// a DNS server.
//
// ## Implementations
//
// - RFC 2136 over TCP with TSIG: `ddns-provider-rfc2136` crate
// - Test doubles: `tests/common/mod.rs`
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, update};
//
// async fn run(provider: &dyn DnsProvider, zone: &Name, host: &Name) -> ddns_core::Result<()> {
//     let message = update::delete_name(zone, host);
//     provider.send_update(message).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{Name, Record};

/// Result of a delivered UPDATE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// The server applied the update
    Applied {
        /// Response code (always NOERROR)
        response_code: ResponseCode,
    },
    /// Dry-run mode: the message was logged, not sent
    Skipped,
}

/// Trait for DNS transports
///
/// # Trust Level: Untrusted
///
/// Providers are single-shot: one request per call, no retry, no state kept
/// between calls. A non-NOERROR response is returned as
/// [`Error::Protocol`](crate::Error::Protocol).
///
/// ## Forbidden Capabilities
/// - ❌ Retry or backoff (the invocation fails instead)
/// - ❌ Modify the message beyond signing it
/// - ❌ Send a message more than once
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Sign and send one UPDATE message, waiting for the response
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: The server answered NOERROR (or dry-run)
    /// - `Err(Error)`: Transport failure, timeout, or a rejecting response code
    async fn send_update(&self, message: Message) -> Result<UpdateResult, crate::Error>;

    /// Run a signed AXFR for `zone` and return every transferred record
    ///
    /// Records are returned in transfer order, including both SOA copies.
    async fn zone_transfer(&self, zone: &Name) -> Result<Vec<Record>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
