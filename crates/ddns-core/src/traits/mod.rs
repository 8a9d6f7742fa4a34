//! Core traits for the DDNS client
//!
//! - [`DnsProvider`]: Deliver UPDATE messages and zone transfers to a server

pub mod dns_provider;

pub use dns_provider::{DnsProvider, UpdateResult};
