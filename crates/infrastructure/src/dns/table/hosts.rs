use super::builder::STATIC_RECORD_TTL;
use super::entry::TableEntry;
use super::AnswerTable;
use crate::dns::wire::encode_name;
use dnsrelay_domain::{Question, RecordType};
use std::net::Ipv4Addr;
use tracing::{debug, warn};

/// One usable mapping from the override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticHost {
    Address { name: String, addr: Ipv4Addr },
    /// Mapped to `0.0.0.0`: answered with NXDOMAIN.
    Blocked { name: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticHostsReport {
    pub addresses: usize,
    pub blocked: usize,
    pub skipped: usize,
}

impl StaticHostsReport {
    pub fn loaded(&self) -> usize {
        self.addresses + self.blocked
    }
}

/// Reads whitespace-separated `address name` pairs.
///
/// Pairs are taken token by token, so line breaks carry no meaning beyond
/// separating tokens. A pair whose address is not dotted-quad IPv4 is
/// skipped and counted; a dangling final token is ignored.
pub fn parse_static_hosts(contents: &str) -> (Vec<StaticHost>, usize) {
    let mut hosts = Vec::new();
    let mut skipped = 0;
    let mut tokens = contents.split_whitespace();

    while let Some(addr_token) = tokens.next() {
        let Some(name) = tokens.next() else {
            warn!(token = %addr_token, "Ignoring trailing token without a name");
            break;
        };

        match addr_token.parse::<Ipv4Addr>() {
            Ok(addr) if addr.is_unspecified() => hosts.push(StaticHost::Blocked {
                name: name.to_string(),
            }),
            Ok(addr) => hosts.push(StaticHost::Address {
                name: name.to_string(),
                addr,
            }),
            Err(_) => {
                warn!(address = %addr_token, name = %name, "Skipping static entry with invalid IPv4 address");
                skipped += 1;
            }
        }
    }

    (hosts, skipped)
}

impl AnswerTable {
    /// Adds one static host. A blocked name gets NXDOMAIN entries for both
    /// A and AAAA; an address gets a single A record.
    pub fn insert_static_host(&mut self, host: &StaticHost) {
        match host {
            StaticHost::Address { name, addr } => {
                match TableEntry::from_record(
                    name,
                    RecordType::A,
                    Question::CLASS_IN,
                    STATIC_RECORD_TTL,
                    &addr.octets(),
                ) {
                    Ok(entry) => {
                        self.insert(entry);
                    }
                    Err(e) => warn!(name = %name, error = %e, "Skipping static entry"),
                }
            }
            StaticHost::Blocked { name } => {
                let wire_name = encode_name(name);
                for record_type in [RecordType::A, RecordType::AAAA] {
                    self.insert(TableEntry::blocked(Question::new(
                        wire_name.as_slice(),
                        record_type.to_u16(),
                        Question::CLASS_IN,
                    )));
                }
            }
        }
    }

    /// Parses `contents` and adds every usable mapping as a static entry.
    pub fn load_static_hosts(&mut self, contents: &str) -> StaticHostsReport {
        let (hosts, skipped) = parse_static_hosts(contents);
        let mut report = StaticHostsReport {
            skipped,
            ..Default::default()
        };

        for host in &hosts {
            match host {
                StaticHost::Address { name, addr } => {
                    debug!(name = %name, address = %addr, "Static address");
                    report.addresses += 1;
                }
                StaticHost::Blocked { name } => {
                    debug!(name = %name, "Static block");
                    report.blocked += 1;
                }
            }
            self.insert_static_host(host);
        }

        report
    }
}
