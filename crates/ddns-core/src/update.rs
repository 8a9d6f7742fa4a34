//! RFC 2136 UPDATE message construction
//!
//! The zone section always names the configured zone (class IN, type SOA).
//! Host names without a trailing dot are relative to that zone.

use std::net::IpAddr;
use std::str::FromStr;

use hickory_proto::op::{Message, MessageType, OpCode, Query, UpdateMessage};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};

use crate::error::{Error, Result};

/// TTL used when `--ttl` is not given
pub const DEFAULT_TTL: u32 = 3600;

/// Parse an IPv4 or IPv6 literal
pub fn parse_ip_address(value: &str) -> Result<IpAddr> {
    value.parse().map_err(|_| Error::invalid_ip(value))
}

/// Resolve a host argument to an absolute name inside `zone`
///
/// `@` names the zone apex.
pub fn resolve_host(zone: &Name, host: &str) -> Result<Name> {
    let host = host.trim();
    if host.is_empty() {
        return Err(Error::invalid_input("host name cannot be empty"));
    }

    let name = if host == "@" {
        zone.clone()
    } else {
        let name = Name::from_str(host)
            .map_err(|e| Error::invalid_input(format!("'{host}' is not a valid host name: {e}")))?;
        if name.is_fqdn() {
            name
        } else {
            name.append_domain(zone)
                .map_err(|e| Error::invalid_input(format!("'{host}' is too long: {e}")))?
        }
    };

    if !zone.zone_of(&name) {
        return Err(Error::invalid_input(format!(
            "'{name}' is not inside zone '{zone}'"
        )));
    }

    Ok(name)
}

/// Record type holding an address of this family
pub fn address_record_type(ip: &IpAddr) -> RecordType {
    match ip {
        IpAddr::V4(_) => RecordType::A,
        IpAddr::V6(_) => RecordType::AAAA,
    }
}

/// Build an UPDATE that replaces the address RRset of `name`
///
/// Deletes every record of the address's type at `name`, then adds the single
/// new record. Records of other types are untouched.
pub fn replace_address(zone: &Name, name: &Name, ttl: u32, ip: IpAddr) -> Message {
    let rtype = address_record_type(&ip);

    let mut delete = Record::update0(name.clone(), 0, rtype);
    delete.set_dns_class(DNSClass::ANY);

    let rdata = match ip {
        IpAddr::V4(v4) => RData::A(A(v4)),
        IpAddr::V6(v6) => RData::AAAA(AAAA(v6)),
    };
    let mut add = Record::from_rdata(name.clone(), ttl, rdata);
    add.set_dns_class(DNSClass::IN);

    let mut message = update_message(zone);
    message.add_update(delete);
    message.add_update(add);
    message
}

/// Build an UPDATE that deletes every RRset owned by `name`
pub fn delete_name(zone: &Name, name: &Name) -> Message {
    // RFC 2136 2.5.3: class ANY, type ANY, TTL 0, empty rdata
    let mut delete = Record::update0(name.clone(), 0, RecordType::ANY);
    delete.set_dns_class(DNSClass::ANY);

    let mut message = update_message(zone);
    message.add_update(delete);
    message
}

fn update_message(zone: &Name) -> Message {
    let mut query = Query::new();
    query
        .set_name(zone.clone())
        .set_query_class(DNSClass::IN)
        .set_query_type(RecordType::SOA);

    // the multiplexer assigns the message id when sending
    let mut message = Message::new();
    message
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Update)
        .set_recursion_desired(false);
    message.add_zone(query);
    message
}
