#![allow(dead_code)]
use dnsrelay_infrastructure::dns::wire::encode_name;
use std::net::{Ipv4Addr, Ipv6Addr};

pub const TYPE_A: u16 = 1;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_MX: u16 = 15;
pub const CLASS_IN: u16 = 1;

/// Compression pointer to the question name at offset 12.
pub const PTR_TO_QUESTION: [u8; 2] = [0xC0, 0x0C];

pub struct QueryBuilder {
    id: u16,
    flags: u16,
    qdcount: Option<u16>,
    name: Vec<u8>,
    qtype: u16,
    qclass: u16,
    trailing: Vec<u8>,
}

impl QueryBuilder {
    pub fn new(id: u16, name: &str, qtype: u16) -> Self {
        Self {
            id,
            flags: 0x0100,
            qdcount: None,
            name: encode_name(name),
            qtype,
            qclass: CLASS_IN,
            trailing: Vec::new(),
        }
    }

    pub fn raw_name(mut self, name: &[u8]) -> Self {
        self.name = name.to_vec();
        self
    }

    pub fn qdcount(mut self, qdcount: u16) -> Self {
        self.qdcount = Some(qdcount);
        self
    }

    pub fn qclass(mut self, qclass: u16) -> Self {
        self.qclass = qclass;
        self
    }

    /// Appends a minimal EDNS0 OPT record and bumps ARCOUNT.
    pub fn with_edns(mut self) -> Self {
        self.trailing
            .extend_from_slice(&[0x00, 0x00, 0x29, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let arcount: u16 = if self.trailing.is_empty() { 0 } else { 1 };
        let mut buf = Vec::with_capacity(12 + self.name.len() + 4 + self.trailing.len());
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&self.qdcount.unwrap_or(1).to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&arcount.to_be_bytes());
        buf.extend_from_slice(&self.name);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_be_bytes());
        buf.extend_from_slice(&self.trailing);
        buf
    }
}

struct Record {
    rtype: u16,
    ttl: u32,
    rdata: Vec<u8>,
}

pub struct ResponseBuilder {
    id: u16,
    opcode: u8,
    rcode: u8,
    authoritative: bool,
    name: Vec<u8>,
    qtype: u16,
    answers: Vec<Record>,
    authority: Vec<Record>,
}

impl ResponseBuilder {
    pub fn new(id: u16, name: &str, qtype: u16) -> Self {
        Self {
            id,
            opcode: 0,
            rcode: 0,
            authoritative: false,
            name: encode_name(name),
            qtype,
            answers: Vec::new(),
            authority: Vec::new(),
        }
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.rcode = rcode;
        self
    }

    pub fn opcode(mut self, opcode: u8) -> Self {
        self.opcode = opcode;
        self
    }

    pub fn authoritative(mut self) -> Self {
        self.authoritative = true;
        self
    }

    pub fn answer_a(mut self, addr: Ipv4Addr, ttl: u32) -> Self {
        self.answers.push(Record {
            rtype: TYPE_A,
            ttl,
            rdata: addr.octets().to_vec(),
        });
        self
    }

    pub fn answer_aaaa(mut self, addr: Ipv6Addr, ttl: u32) -> Self {
        self.answers.push(Record {
            rtype: TYPE_AAAA,
            ttl,
            rdata: addr.octets().to_vec(),
        });
        self
    }

    /// SOA-typed authority record with opaque RDATA.
    pub fn authority_soa(mut self, ttl: u32) -> Self {
        self.authority.push(Record {
            rtype: 6,
            ttl,
            rdata: vec![0; 22],
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut flags: u16 = 0x8000 | 0x0100 | 0x0080;
        flags |= (self.opcode as u16 & 0x0F) << 11;
        flags |= self.rcode as u16 & 0x0F;
        if self.authoritative {
            flags |= 0x0400;
        }

        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&flags.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        buf.extend_from_slice(&(self.authority.len() as u16).to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&self.name);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&CLASS_IN.to_be_bytes());

        for record in self.answers.iter().chain(self.authority.iter()) {
            buf.extend_from_slice(&PTR_TO_QUESTION);
            buf.extend_from_slice(&record.rtype.to_be_bytes());
            buf.extend_from_slice(&CLASS_IN.to_be_bytes());
            buf.extend_from_slice(&record.ttl.to_be_bytes());
            buf.extend_from_slice(&(record.rdata.len() as u16).to_be_bytes());
            buf.extend_from_slice(&record.rdata);
        }
        buf
    }
}

pub fn id_of(buf: &[u8]) -> u16 {
    u16::from_be_bytes([buf[0], buf[1]])
}

pub fn flags_of(buf: &[u8]) -> u16 {
    u16::from_be_bytes([buf[2], buf[3]])
}

pub fn rcode_of(buf: &[u8]) -> u8 {
    buf[3] & 0x0F
}

pub fn ancount_of(buf: &[u8]) -> u16 {
    u16::from_be_bytes([buf[6], buf[7]])
}

fn skip_name(buf: &[u8], mut pos: usize) -> usize {
    loop {
        let len = buf[pos];
        if len == 0 {
            return pos + 1;
        }
        if len & 0xC0 == 0xC0 {
            return pos + 2;
        }
        pos += 1 + len as usize;
    }
}

fn first_record_offset(buf: &[u8]) -> usize {
    skip_name(buf, 12) + 4
}

/// TTLs of the answer records.
pub fn answer_ttls(buf: &[u8]) -> Vec<u32> {
    let mut pos = first_record_offset(buf);
    let mut ttls = Vec::new();
    for _ in 0..ancount_of(buf) {
        pos = skip_name(buf, pos) + 4;
        ttls.push(u32::from_be_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]]));
        let rdlength = u16::from_be_bytes([buf[pos + 4], buf[pos + 5]]) as usize;
        pos += 6 + rdlength;
    }
    ttls
}

/// RDATA of the first answer record.
pub fn first_answer_rdata(buf: &[u8]) -> Vec<u8> {
    let pos = skip_name(buf, first_record_offset(buf)) + 8;
    let rdlength = u16::from_be_bytes([buf[pos], buf[pos + 1]]) as usize;
    buf[pos + 2..pos + 2 + rdlength].to_vec()
}
