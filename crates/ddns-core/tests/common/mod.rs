//! Test doubles and common utilities for contract tests
//!
//! The mock provider records every message it is handed instead of touching
//! the network, so tests can assert what would have gone on the wire.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::hickory_proto::op::{Message, ResponseCode};
use ddns_core::hickory_proto::rr::rdata::{A, AAAA, SOA};
use ddns_core::hickory_proto::rr::{Name, RData, Record};
use ddns_core::traits::{DnsProvider, UpdateResult};
use ddns_core::{InvocationContext, KeyAlgorithm, Keyring};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A mock DnsProvider that records calls
pub struct MockDnsProvider {
    /// Messages handed to send_update()
    sent: Arc<Mutex<Vec<Message>>>,
    /// Call counter for zone_transfer()
    transfer_call_count: Arc<AtomicUsize>,
    /// Records returned by zone_transfer()
    zone_records: Vec<Record>,
    /// Response code every call fails with, if set
    reject_with: Option<ResponseCode>,
    /// Provider name
    pub name: &'static str,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            transfer_call_count: Arc::new(AtomicUsize::new(0)),
            zone_records: Vec::new(),
            reject_with: None,
            name: "mock",
        }
    }

    /// Serve these records on zone transfer
    pub fn with_zone(mut self, records: Vec<Record>) -> Self {
        self.zone_records = records;
        self
    }

    /// Fail every call with this response code
    pub fn rejecting(mut self, code: ResponseCode) -> Self {
        self.reject_with = Some(code);
        self
    }

    /// Messages sent so far
    pub fn sent_messages(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of send_update() calls
    pub fn update_call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Number of zone_transfer() calls
    pub fn transfer_call_count(&self) -> usize {
        self.transfer_call_count.load(Ordering::SeqCst)
    }

    /// Total number of network-facing calls
    pub fn total_calls(&self) -> usize {
        self.update_call_count() + self.transfer_call_count()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn send_update(&self, message: Message) -> Result<UpdateResult> {
        self.sent.lock().unwrap().push(message);

        match self.reject_with {
            Some(code) => Err(Error::protocol("UPDATE", code)),
            None => Ok(UpdateResult::Applied {
                response_code: ResponseCode::NoError,
            }),
        }
    }

    async fn zone_transfer(&self, _zone: &Name) -> Result<Vec<Record>> {
        self.transfer_call_count.fetch_add(1, Ordering::SeqCst);

        match self.reject_with {
            Some(code) => Err(Error::protocol("AXFR", code)),
            None => Ok(self.zone_records.clone()),
        }
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

/// Helper to create a context for `example.com.`
pub fn test_context() -> InvocationContext {
    let keyring = Keyring::from_text("ddns-key", "c2VjcmV0", KeyAlgorithm::HmacSha256).unwrap();
    InvocationContext::new(name("example.com."), "127.0.0.1", 53, keyring).unwrap()
}

pub fn soa_record(origin: &str) -> Record {
    Record::from_rdata(
        name(origin),
        3600,
        RData::SOA(SOA::new(
            name("ns1.example.com."),
            name("hostmaster.example.com."),
            2024010101,
            3600,
            600,
            604800,
            300,
        )),
    )
}

pub fn a_record(owner: &str, ttl: u32, ip: [u8; 4]) -> Record {
    Record::from_rdata(name(owner), ttl, RData::A(A::new(ip[0], ip[1], ip[2], ip[3])))
}

pub fn aaaa_record(owner: &str, ttl: u32, ip: &str) -> Record {
    Record::from_rdata(name(owner), ttl, RData::AAAA(AAAA(ip.parse().unwrap())))
}
