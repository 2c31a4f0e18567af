use super::{read_u16, write_u16};
use dnsrelay_domain::{DomainError, ResponseCode};

pub const HEADER_LEN: usize = 12;

const FLAG_QR: u16 = 0x8000;
const FLAG_AA: u16 = 0x0400;
const FLAG_RA: u16 = 0x0080;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x0F;
const RCODE_MASK: u16 = 0x000F;

/// Copy of the fixed 12-byte header at the start of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn parse(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < HEADER_LEN {
            return Err(DomainError::MalformedPacket(format!(
                "{} bytes is shorter than a DNS header",
                buf.len()
            )));
        }

        Ok(Self {
            id: read_u16(buf, 0),
            flags: read_u16(buf, 2),
            qdcount: read_u16(buf, 4),
            ancount: read_u16(buf, 6),
            nscount: read_u16(buf, 8),
            arcount: read_u16(buf, 10),
        })
    }

    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags & FLAG_QR != 0
    }

    #[inline]
    pub fn opcode(&self) -> u8 {
        ((self.flags >> OPCODE_SHIFT) & OPCODE_MASK) as u8
    }

    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.flags & FLAG_AA != 0
    }

    #[inline]
    pub fn recursion_available(&self) -> bool {
        self.flags & FLAG_RA != 0
    }

    #[inline]
    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from((self.flags & RCODE_MASK) as u8)
    }

    /// Total of the answer, authority and additional counts.
    pub fn record_count(&self) -> usize {
        self.ancount as usize + self.nscount as usize + self.arcount as usize
    }
}

// In-place patches below assume `buf` holds at least a full header.

pub fn set_id(buf: &mut [u8], id: u16) {
    write_u16(buf, 0, id);
}

pub fn clear_authoritative(buf: &mut [u8]) {
    let flags = read_u16(buf, 2) & !FLAG_AA;
    write_u16(buf, 2, flags);
}

/// Turns a copied query header into the header of a locally answered
/// reply: QR and RA set, AA cleared, the given rcode, one question and
/// the given section counts. The id and the remaining flag bits (RD among
/// them) are left as the client sent them.
pub fn mark_local_answer(
    buf: &mut [u8],
    rcode: ResponseCode,
    ancount: u16,
    nscount: u16,
    arcount: u16,
) {
    let mut flags = read_u16(buf, 2);
    flags |= FLAG_QR | FLAG_RA;
    flags &= !(FLAG_AA | RCODE_MASK);
    flags |= rcode.to_u8() as u16 & RCODE_MASK;
    write_u16(buf, 2, flags);
    write_u16(buf, 4, 1);
    write_u16(buf, 6, ancount);
    write_u16(buf, 8, nscount);
    write_u16(buf, 10, arcount);
}
