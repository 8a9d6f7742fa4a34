//! DNS operation executor
//!
//! The Executor maps one operation onto one provider call:
//! - `add`: validate the address, build a replace UPDATE, send it
//! - `delete`: build a delete-all UPDATE, send it
//! - `get`: transfer the zone and list its A records
//!
//! ## Flow
//!
//! ```text
//! ┌────────────┐   ┌─────────────────────┐
//! │ Operation  │──▶│ Executor            │
//! └────────────┘   │ (InvocationContext) │
//!                  └─────────────────────┘
//!                             │
//!              ┌──────────────┴──────────────┐
//!              ▼                             ▼
//!      ┌──────────────┐             ┌──────────────┐
//!      │ update::*    │             │ ZoneSnapshot │
//!      │ (Message)    │             │ (AXFR)       │
//!      └──────────────┘             └──────────────┘
//!              │                             ▲
//!              └────────▶ DnsProvider ───────┘
//! ```
//!
//! Every input check happens before the provider is touched, and each
//! operation calls the provider at most once.

use tracing::{debug, info};

use crate::context::InvocationContext;
use crate::error::Result;
use crate::traits::{DnsProvider, UpdateResult};
use crate::update;
use crate::zone::{AddressEntry, ZoneSnapshot};

/// One client operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Replace the address records of a host
    Add {
        /// Host name, relative to the zone unless it ends with a dot
        host: String,
        /// TTL of the new record
        ttl: u32,
        /// Address literal, validated before anything is sent
        ipaddr: String,
    },
    /// Delete every record owned by a host
    Delete {
        /// Host name
        host: String,
    },
    /// List the zone's A records
    Get,
}

/// What an operation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An UPDATE was delivered (or skipped in dry-run)
    Updated(UpdateResult),
    /// The zone's address listing
    Listing(Vec<AddressEntry>),
}

/// Executes operations against one provider
pub struct Executor<'a> {
    context: &'a InvocationContext,
    provider: &'a dyn DnsProvider,
}

impl<'a> Executor<'a> {
    /// Create an executor for an invocation
    pub fn new(context: &'a InvocationContext, provider: &'a dyn DnsProvider) -> Self {
        Self { context, provider }
    }

    /// Run one operation
    pub async fn execute(&self, operation: Operation) -> Result<Outcome> {
        match operation {
            Operation::Add { host, ttl, ipaddr } => {
                self.add(&host, ttl, &ipaddr).await.map(Outcome::Updated)
            }
            Operation::Delete { host } => self.delete(&host).await.map(Outcome::Updated),
            Operation::Get => self.list_addresses().await.map(Outcome::Listing),
        }
    }

    /// Replace the address RRset of `host` with a single record
    pub async fn add(&self, host: &str, ttl: u32, ipaddr: &str) -> Result<UpdateResult> {
        let ip = update::parse_ip_address(ipaddr)?;
        let name = update::resolve_host(self.context.zone(), host)?;

        info!(
            "Replacing {} records: {} -> {} (ttl {}) via {}",
            update::address_record_type(&ip),
            name,
            ip,
            ttl,
            self.provider.provider_name()
        );

        let message = update::replace_address(self.context.zone(), &name, ttl, ip);
        self.provider.send_update(message).await
    }

    /// Delete every record owned by `host`
    pub async fn delete(&self, host: &str) -> Result<UpdateResult> {
        let name = update::resolve_host(self.context.zone(), host)?;

        info!(
            "Deleting all records: {} via {}",
            name,
            self.provider.provider_name()
        );

        let message = update::delete_name(self.context.zone(), &name);
        self.provider.send_update(message).await
    }

    /// Transfer the zone into a snapshot
    pub async fn get(&self) -> Result<ZoneSnapshot> {
        let zone = self.context.zone();
        info!("Transferring zone {} from {}", zone, self.context.server());

        let records = self.provider.zone_transfer(zone).await?;
        let snapshot = ZoneSnapshot::from_records(zone.clone(), records);

        debug!(
            "Zone {} holds {} record(s) across {} name(s)",
            zone,
            snapshot.record_count(),
            snapshot.nodes().len()
        );
        Ok(snapshot)
    }

    /// Transfer the zone and list its A records
    pub async fn list_addresses(&self) -> Result<Vec<AddressEntry>> {
        Ok(self.get().await?.address_entries())
    }
}
