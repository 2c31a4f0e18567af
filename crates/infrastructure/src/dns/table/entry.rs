use dnsrelay_domain::{Question, ResponseCode};
use smallvec::SmallVec;

/// Where an entry came from, and for cached answers when it was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Loaded from the override file. Never expires, never evicted.
    Static,
    /// Learned from an upstream response.
    Cache {
        /// Receive time as a Unix timestamp (seconds).
        received_at_secs: u64,
        /// Smallest TTL over all records in the response.
        min_ttl: u32,
    },
}

/// How an entry looks at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Permanent,
    /// Still usable; every stored TTL should be reduced by `elapsed`.
    Fresh { elapsed: u32 },
    Expired,
}

/// A stored answer for one question.
///
/// `sections` is the answer, authority and additional sections exactly as
/// they will be spliced after the question of a reply. `ttl_offsets` point
/// at the first byte of each record's 32-bit TTL inside `sections`.
#[derive(Debug, Clone)]
pub struct TableEntry {
    pub question: Question,
    pub rcode: ResponseCode,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
    pub sections: Box<[u8]>,
    pub ttl_offsets: SmallVec<[usize; 4]>,
    pub kind: EntryKind,
}

impl TableEntry {
    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self.kind, EntryKind::Static)
    }

    #[inline]
    pub fn record_count(&self) -> usize {
        self.ancount as usize + self.nscount as usize + self.arcount as usize
    }

    /// A cached entry stays fresh while fewer than `min_ttl` seconds have
    /// passed since it was received.
    pub fn freshness_at(&self, now_secs: u64) -> Freshness {
        match self.kind {
            EntryKind::Static => Freshness::Permanent,
            EntryKind::Cache {
                received_at_secs,
                min_ttl,
            } => {
                let elapsed = now_secs.saturating_sub(received_at_secs);
                if elapsed < min_ttl as u64 {
                    Freshness::Fresh {
                        elapsed: elapsed as u32,
                    }
                } else {
                    Freshness::Expired
                }
            }
        }
    }
}
