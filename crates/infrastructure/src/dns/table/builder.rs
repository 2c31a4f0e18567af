use super::entry::{EntryKind, TableEntry};
use crate::dns::wire::{
    encode_name, name_byte_length, parse_question, read_u16, read_u32, Header,
};
use dnsrelay_domain::{DomainError, Question, RecordType, ResponseCode};
use smallvec::SmallVec;

/// TTL written into answers built from the override file.
pub const STATIC_RECORD_TTL: u32 = 300;

/// Lifetime given to cached responses that carry no records at all.
pub const EMPTY_RESPONSE_TTL: u32 = 300;

/// TYPE(2) + CLASS(2) + TTL(4) + RDLENGTH(2) after each record's owner name.
const RECORD_FIXED_LEN: usize = 10;

impl TableEntry {
    /// Static entry answering `name` with a single record.
    pub fn from_record(
        name: &str,
        record_type: RecordType,
        class: u16,
        ttl: u32,
        rdata: &[u8],
    ) -> Result<Self, DomainError> {
        let rdlength = u16::try_from(rdata.len()).map_err(|_| {
            DomainError::MalformedPacket(format!("{} bytes of RDATA", rdata.len()))
        })?;
        let wire_name = encode_name(name);
        let qtype = record_type.to_u16();

        let mut sections = Vec::with_capacity(wire_name.len() + RECORD_FIXED_LEN + rdata.len());
        sections.extend_from_slice(&wire_name);
        sections.extend_from_slice(&qtype.to_be_bytes());
        sections.extend_from_slice(&class.to_be_bytes());
        let ttl_offset = sections.len();
        sections.extend_from_slice(&ttl.to_be_bytes());
        sections.extend_from_slice(&rdlength.to_be_bytes());
        sections.extend_from_slice(rdata);

        let mut ttl_offsets = SmallVec::new();
        ttl_offsets.push(ttl_offset);

        Ok(Self {
            question: Question::new(wire_name, qtype, class),
            rcode: ResponseCode::NoError,
            ancount: 1,
            nscount: 0,
            arcount: 0,
            sections: sections.into_boxed_slice(),
            ttl_offsets,
            kind: EntryKind::Static,
        })
    }

    /// Static NXDOMAIN entry with no records.
    pub fn blocked(question: Question) -> Self {
        Self {
            question,
            rcode: ResponseCode::NxDomain,
            ancount: 0,
            nscount: 0,
            arcount: 0,
            sections: Box::default(),
            ttl_offsets: SmallVec::new(),
            kind: EntryKind::Static,
        }
    }

    /// Cache entry holding everything after the question of an upstream
    /// response received at `now_secs`.
    ///
    /// Each record's owner name is skipped with `name_byte_length`, so
    /// compression pointers are stepped over, never followed. Any record
    /// header or RDATA that runs past the end of `raw` rejects the whole
    /// response.
    pub fn from_response(raw: &[u8], now_secs: u64) -> Result<Self, DomainError> {
        let parsed = parse_question(raw)?;
        let header: Header = parsed.header;
        let sections_start = parsed.question_end;

        let mut offset = sections_start;
        let mut ttl_offsets = SmallVec::new();
        let mut min_ttl: Option<u32> = None;

        for index in 0..header.record_count() {
            let name_len = name_byte_length(&raw[offset..], raw.len() - offset);
            if offset + name_len + RECORD_FIXED_LEN > raw.len() {
                return Err(DomainError::MalformedPacket(format!(
                    "record {} header is incomplete",
                    index
                )));
            }
            offset += name_len;

            let ttl = read_u32(raw, offset + 4);
            let rdlength = read_u16(raw, offset + 8) as usize;
            ttl_offsets.push(offset + 4 - sections_start);
            min_ttl = Some(min_ttl.map_or(ttl, |current| current.min(ttl)));

            offset += RECORD_FIXED_LEN + rdlength;
            if offset > raw.len() {
                return Err(DomainError::MalformedPacket(format!(
                    "record {} data is incomplete",
                    index
                )));
            }
        }

        Ok(Self {
            question: parsed.question,
            rcode: header.response_code(),
            ancount: header.ancount,
            nscount: header.nscount,
            arcount: header.arcount,
            sections: raw[sections_start..offset].into(),
            ttl_offsets,
            kind: EntryKind::Cache {
                received_at_secs: now_secs,
                min_ttl: min_ttl.unwrap_or(EMPTY_RESPONSE_TTL),
            },
        })
    }
}
