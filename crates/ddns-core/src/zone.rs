//! Zone snapshot built from an AXFR, and the address listing rendered from it

use std::collections::HashMap;
use std::net::Ipv4Addr;

use hickory_proto::rr::{Name, RData, Record, RecordType};
use serde::Serialize;

use crate::error::Result;

/// Records of one owner name
#[derive(Debug, Clone)]
pub struct ZoneNode {
    name: Name,
    records: Vec<Record>,
}

impl ZoneNode {
    /// Owner name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// All records owned by this name, in transfer order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// IPv4 addresses of this node's A records
    pub fn ipv4_addresses(&self) -> impl Iterator<Item = (Ipv4Addr, u32)> + '_ {
        self.records.iter().filter_map(|r| match r.data() {
            RData::A(a) => Some((a.0, r.ttl())),
            _ => None,
        })
    }
}

/// In-memory copy of a transferred zone
///
/// Nodes keep the order in which their owner names first appeared in the
/// transfer, so the apex comes first.
#[derive(Debug, Clone)]
pub struct ZoneSnapshot {
    origin: Name,
    nodes: Vec<ZoneNode>,
}

impl ZoneSnapshot {
    /// Materialise the records of an AXFR stream
    ///
    /// An AXFR is bracketed by two copies of the zone SOA; the closing copy is
    /// dropped. Records outside the zone are ignored.
    pub fn from_records(origin: Name, records: impl IntoIterator<Item = Record>) -> Self {
        let mut nodes: Vec<ZoneNode> = Vec::new();
        let mut index: HashMap<Name, usize> = HashMap::new();
        let mut seen_soa = false;

        for record in records {
            if record.record_type() == RecordType::SOA && record.name() == &origin {
                if seen_soa {
                    continue;
                }
                seen_soa = true;
            }

            if !origin.zone_of(record.name()) {
                tracing::debug!("Ignoring out-of-zone record: {}", record.name());
                continue;
            }

            // Name equality is case-insensitive, so the index key is lowercased
            let key = record.name().to_lowercase();
            match index.get(&key) {
                Some(&i) => nodes[i].records.push(record),
                None => {
                    index.insert(key, nodes.len());
                    nodes.push(ZoneNode {
                        name: record.name().clone(),
                        records: vec![record],
                    });
                }
            }
        }

        Self { origin, nodes }
    }

    /// The zone apex
    pub fn origin(&self) -> &Name {
        &self.origin
    }

    /// Owner names with their records
    pub fn nodes(&self) -> &[ZoneNode] {
        &self.nodes
    }

    /// Total number of records held
    pub fn record_count(&self) -> usize {
        self.nodes.iter().map(|n| n.records.len()).sum()
    }

    /// One entry per owner name that has at least one A record
    ///
    /// The entry carries the first A record of that name.
    pub fn address_entries(&self) -> Vec<AddressEntry> {
        self.nodes
            .iter()
            .filter_map(|node| {
                let (address, ttl) = node.ipv4_addresses().next()?;
                Some(AddressEntry {
                    name: relative_name(&self.origin, &node.name),
                    address,
                    ttl,
                })
            })
            .collect()
    }
}

/// A listed address record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressEntry {
    /// Owner name relative to the zone (`@` for the apex)
    pub name: String,
    /// IPv4 address
    pub address: Ipv4Addr,
    /// Record TTL
    pub ttl: u32,
}

impl AddressEntry {
    /// Render as a listing line: two left-justified columns of width 10 and 15
    pub fn to_line(&self) -> String {
        format_address_line(&self.name, &self.address.to_string())
    }
}

/// Format one listing line
pub fn format_address_line(name: &str, ip: &str) -> String {
    format!("{name:<10} | {ip:<15}")
}

/// Render the listing, one line per entry, each terminated by a newline
pub fn render_table(entries: &[AddressEntry]) -> String {
    entries.iter().map(|e| e.to_line() + "\n").collect()
}

/// Render the listing as a pretty-printed JSON array
pub fn render_json(entries: &[AddressEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Name of `name` relative to `origin`, `@` for the apex
///
/// Names outside `origin` are rendered absolute.
pub fn relative_name(origin: &Name, name: &Name) -> String {
    if !origin.zone_of(name) {
        return name.to_ascii();
    }

    // num_labels() skips a leading wildcard, so count the raw labels
    let keep = name.iter().count() - origin.iter().count();
    if keep == 0 {
        return "@".to_string();
    }

    name.iter()
        .take(keep)
        .map(|label| String::from_utf8_lossy(label).into_owned())
        .collect::<Vec<_>>()
        .join(".")
}
