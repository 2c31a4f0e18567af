use super::table::TableEntry;
use super::wire::header::{mark_local_answer, HEADER_LEN};
use super::wire::read_u32;

/// Builds the reply to a query answered from the table.
///
/// `query_prefix` is the client's header and question, up to the end of the
/// question section. The stored sections are spliced after it unchanged, so
/// compression pointers recorded against the upstream question stay valid.
/// When `age` is given every recorded TTL is lowered by that many seconds.
///
/// Anything the client sent after its question (an EDNS0 OPT record, for
/// instance) is not echoed.
pub fn build_cache_hit_response(
    query_prefix: &[u8],
    entry: &TableEntry,
    age: Option<u32>,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(query_prefix.len() + entry.sections.len());
    buf.extend_from_slice(query_prefix);
    if buf.len() >= HEADER_LEN {
        mark_local_answer(
            &mut buf,
            entry.rcode,
            entry.ancount,
            entry.nscount,
            entry.arcount,
        );
    }

    let sections_start = buf.len();
    buf.extend_from_slice(&entry.sections);

    if let Some(age) = age {
        for &offset in &entry.ttl_offsets {
            let pos = sections_start + offset;
            if pos + 4 > buf.len() {
                continue;
            }
            let ttl = read_u32(&buf, pos).saturating_sub(age);
            buf[pos..pos + 4].copy_from_slice(&ttl.to_be_bytes());
        }
    }

    buf
}
