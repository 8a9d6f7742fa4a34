// # RFC 2136 DNS Provider
//
// This crate delivers TSIG-signed DNS UPDATE messages and zone transfers to an
// authoritative server over TCP.
//
// - ✅ One TCP connection and one request per call
// - ✅ Every request signed with the configured TSIG key, every response verified
// - ✅ Fixed 10 second timeout for the whole UPDATE exchange
// - ✅ AXFR without an explicit timeout (library default per request)
// - ✅ Dry-run mode: UPDATE messages are logged instead of sent
// - ❌ NO retry logic (a failed invocation fails)
//
// ## Why TCP?
//
// UPDATE and AXFR messages are signed as a whole, and an AXFR answer spans
// many messages. TCP carries both without truncation.

use async_trait::async_trait;
use ddns_core::traits::{DnsProvider, UpdateResult};
use ddns_core::{Error, InvocationContext, Result};
use hickory_client::client::{Client, ClientHandle};
use hickory_client::proto::dnssec::tsig::TSigner;
use hickory_client::proto::op::{Message, ResponseCode};
use hickory_client::proto::rr::{Name, Record};
use hickory_client::proto::runtime::TokioRuntimeProvider;
use hickory_client::proto::tcp::TcpClientStream;
use hickory_client::proto::xfer::{
    DnsHandle, DnsMultiplexer, DnsRequest, DnsRequestOptions, FirstAnswer,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;

/// Bound on a whole UPDATE exchange (resolve, connect and response)
pub const UPDATE_TIMEOUT: Duration = Duration::from_secs(10);

/// RFC 2136 provider
///
/// # Trust Level: Untrusted
///
/// Isolated, stateless and single-shot.
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - Log the UPDATE message it would have sent
/// - **NOT** open a connection for UPDATE
/// - Still perform zone transfers (read-only)
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the TSIG key.
pub struct Rfc2136Provider {
    /// Server host name or address
    server: String,

    /// Server port
    port: u16,

    /// TSIG signer
    /// ⚠️ NEVER log this value
    signer: TSigner,

    /// Timeout applied to UPDATE exchanges
    update_timeout: Duration,

    /// Dry-run mode: if true, log UPDATE messages instead of sending them
    dry_run: bool,
}

// Custom Debug implementation that hides the TSIG key
impl std::fmt::Debug for Rfc2136Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rfc2136Provider")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("key_name", self.signer.signer_name())
            .field("key", &"<REDACTED>")
            .field("update_timeout", &self.update_timeout)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Rfc2136Provider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `server`: Host name or address of the server accepting UPDATE/AXFR
    /// - `port`: Server port (normally 53)
    /// - `signer`: TSIG signer built from the keyring
    /// - `dry_run`: If true, log UPDATE messages instead of sending them
    pub fn new(server: impl Into<String>, port: u16, signer: TSigner, dry_run: bool) -> Self {
        Self {
            server: server.into(),
            port,
            signer,
            update_timeout: UPDATE_TIMEOUT,
            dry_run,
        }
    }

    /// Override the bound on UPDATE exchanges
    pub fn with_update_timeout(mut self, timeout: Duration) -> Self {
        self.update_timeout = timeout;
        self
    }

    /// Create a provider for the server and keyring of an invocation
    pub fn from_context(context: &InvocationContext, dry_run: bool) -> Result<Self> {
        let signer = context.keyring().signer()?;

        if dry_run {
            tracing::warn!("RFC 2136 provider running in DRY-RUN mode - no changes will be made");
        }

        Ok(Self::new(context.server(), context.port(), signer, dry_run))
    }

    /// Resolve the configured server to a socket address
    async fn resolve(&self) -> Result<SocketAddr> {
        let mut addrs = tokio::net::lookup_host((self.server.as_str(), self.port)).await?;

        addrs.next().ok_or_else(|| {
            Error::transport(format!("{} did not resolve to any address", self.server))
        })
    }

    /// Open a TSIG-signing TCP client to the server
    ///
    /// With `timeout` set, it bounds both the connect and each response.
    async fn connect(&self, timeout: Option<Duration>) -> Result<Client> {
        let addr = self.resolve().await?;
        tracing::debug!("Connecting to {} over TCP", addr);

        let (stream, sender) =
            TcpClientStream::new(addr, None, timeout, TokioRuntimeProvider::default());

        let multiplexer = match timeout {
            Some(timeout) => DnsMultiplexer::with_timeout(
                stream,
                sender,
                timeout,
                Some(Arc::new(self.signer.clone())),
            ),
            None => DnsMultiplexer::new(stream, sender, Some(Arc::new(self.signer.clone()))),
        };

        let (client, background) = Client::connect(multiplexer)
            .await
            .map_err(|e| Error::transport(format!("failed to connect to {addr}: {e}")))?;

        // Drives the connection; ends when the client is dropped
        tokio::spawn(background);

        Ok(client)
    }

    /// Deliver one UPDATE and return the server's response code
    async fn exchange(&self, message: Message) -> Result<ResponseCode> {
        let client = self.connect(Some(self.update_timeout)).await?;

        let request = DnsRequest::new(message, DnsRequestOptions::default());
        let response = client
            .send(request)
            .first_answer()
            .await
            .map_err(|e| Error::transport(format!("UPDATE to {} failed: {e}", self.server)))?;

        Ok(response.response_code())
    }
}

#[async_trait]
impl DnsProvider for Rfc2136Provider {
    /// Sign and send one UPDATE
    ///
    /// The whole exchange, name resolution included, is bounded by
    /// [`UPDATE_TIMEOUT`]. Any response code other than NOERROR is returned as
    /// [`Error::Protocol`].
    async fn send_update(&self, message: Message) -> Result<UpdateResult> {
        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send UPDATE to {}:{}: {:?}",
                self.server,
                self.port,
                message
            );
            return Ok(UpdateResult::Skipped);
        }

        let response_code = tokio::time::timeout(self.update_timeout, self.exchange(message))
            .await
            .map_err(|_| {
                Error::transport(format!(
                    "UPDATE to {} timed out after {:?}",
                    self.server, self.update_timeout
                ))
            })??;

        if response_code != ResponseCode::NoError {
            tracing::error!("UPDATE rejected by {}: {}", self.server, response_code);
            return Err(Error::protocol("UPDATE", response_code));
        }

        tracing::info!("UPDATE accepted by {}", self.server);
        Ok(UpdateResult::Applied { response_code })
    }

    /// Run a signed AXFR and return every record in transfer order
    async fn zone_transfer(&self, zone: &Name) -> Result<Vec<Record>> {
        let mut client = self.connect(None).await?;

        let mut responses = std::pin::pin!(client.zone_transfer(zone.clone(), None));
        let mut records = Vec::new();

        while let Some(response) = responses.next().await {
            let response = response
                .map_err(|e| Error::transport(format!("AXFR of {zone} failed: {e}")))?;

            let response_code = response.response_code();
            if response_code != ResponseCode::NoError {
                tracing::error!("AXFR of {} rejected: {}", zone, response_code);
                return Err(Error::protocol("AXFR", response_code));
            }

            records.extend(response.answers().iter().cloned());
        }

        tracing::debug!("AXFR of {} returned {} record(s)", zone, records.len());
        Ok(records)
    }

    fn provider_name(&self) -> &'static str {
        "rfc2136"
    }
}
