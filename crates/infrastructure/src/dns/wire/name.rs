/// Longest encoded name, length octets and root terminator included.
pub const MAX_ENCODED_NAME_LEN: usize = 255;

/// Longest dotted text that still encodes within `MAX_ENCODED_NAME_LEN`.
/// Encoding adds one leading length octet and the terminator.
const MAX_TEXT_LEN: usize = MAX_ENCODED_NAME_LEN - 2;

const POINTER_MASK: u8 = 0xC0;

/// Encodes a dotted name into length-prefixed labels.
///
/// One trailing dot is dropped first. Text longer than 253 bytes is cut at
/// byte 253 (which may split a label) so the result never exceeds 255 bytes.
/// The empty name and `"."` both encode to the root name `[0]`.
pub fn encode_name(name: &str) -> Vec<u8> {
    let text = name.as_bytes();
    let text = text.strip_suffix(b".").unwrap_or(text);
    let text = &text[..text.len().min(MAX_TEXT_LEN)];

    let mut wire = Vec::with_capacity(text.len() + 2);
    if !text.is_empty() {
        for label in text.split(|&b| b == b'.') {
            wire.push(label.len() as u8);
            wire.extend_from_slice(label);
        }
    }
    wire.push(0);
    wire
}

/// Turns length-prefixed labels back into dotted text.
///
/// Stops at the terminator, at a compression pointer (which is not
/// followed), at the end of the buffer, or after 255 bytes.
pub fn decode_name(wire: &[u8]) -> String {
    let limit = wire.len().min(MAX_ENCODED_NAME_LEN);
    let mut text = Vec::with_capacity(limit);
    let mut pos = 0;

    while pos < limit {
        let label_len = wire[pos];
        if label_len == 0 || label_len & POINTER_MASK == POINTER_MASK {
            break;
        }
        pos += 1;
        let end = (pos + label_len as usize).min(limit);
        if !text.is_empty() {
            text.push(b'.');
        }
        text.extend_from_slice(&wire[pos..end]);
        pos = end;
    }

    String::from_utf8_lossy(&text).into_owned()
}

/// Number of bytes the name at the start of `wire` occupies, capped at
/// `max_len`.
///
/// A compression pointer ends the name after its two bytes; the pointer
/// target is never visited. A name that runs past `max_len` or past the end
/// of `wire` without terminating reports `max_len`, which callers treat as
/// "does not fit".
pub fn name_byte_length(wire: &[u8], max_len: usize) -> usize {
    let mut pos = 0;

    while pos < wire.len() && pos < max_len {
        let label_len = wire[pos];
        if label_len == 0 {
            return (pos + 1).min(max_len);
        }
        if label_len & POINTER_MASK == POINTER_MASK {
            return (pos + 2).min(max_len);
        }
        pos += 1 + label_len as usize;
    }

    max_len
}
