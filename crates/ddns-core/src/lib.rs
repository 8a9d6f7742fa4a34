// # ddns-core
//
// Core library for the TSIG-signed RFC 2136 dynamic DNS client.
//
// ## Architecture Overview
//
// - **DdnsConfig**: Environment-driven, fail-fast configuration
// - **Keyring** / **InvocationContext**: Zone, server and TSIG key for one run
// - **update**: UPDATE message construction (replace, delete)
// - **ZoneSnapshot**: AXFR result and its address listing
// - **DnsProvider**: Trait for the transport that signs and sends messages
// - **Executor**: Maps one operation onto one provider call
//
// ## Design Principles
//
// 1. **Single-shot**: One request per invocation, no retry
// 2. **Validate first**: All input is checked before anything is sent
// 3. **Library-First**: The binary only parses arguments and prints results

pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod keyring;
pub mod traits;
pub mod update;
pub mod zone;

// Re-export core types for convenience
pub use config::{DdnsConfig, KeyAlgorithm, Mode};
pub use context::InvocationContext;
pub use error::{Error, Result};
pub use executor::{Executor, Operation, Outcome};
pub use keyring::Keyring;
pub use traits::{DnsProvider, UpdateResult};
pub use zone::{AddressEntry, ZoneSnapshot};

// The provider crate and tests build messages with the same hickory types
pub use hickory_proto;
