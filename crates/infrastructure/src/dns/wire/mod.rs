//! Byte-level DNS message handling.
//!
//! Nothing in here builds a full message model: the relay only needs to read
//! and patch header fields, pull out the single question, and walk record
//! headers far enough to find their TTLs.

pub mod header;
pub mod name;
pub mod question;

pub use header::{Header, HEADER_LEN};
pub use name::{decode_name, encode_name, name_byte_length, MAX_ENCODED_NAME_LEN};
pub use question::{parse_question, ParsedQuestion};

#[inline]
pub(crate) fn read_u16(buf: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([buf[pos], buf[pos + 1]])
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], pos: usize) -> u32 {
    u32::from_be_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

#[inline]
pub(crate) fn write_u16(buf: &mut [u8], pos: usize, value: u16) {
    buf[pos..pos + 2].copy_from_slice(&value.to_be_bytes());
}
