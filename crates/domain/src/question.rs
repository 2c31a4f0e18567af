use crate::RecordType;
use std::hash::{Hash, Hasher};

const HASH_MODULUS: u64 = 1_000_000_007;
const HASH_MULTIPLIER: u64 = 17;

/// The (name, type, class) tuple a query asks about.
///
/// `name` holds the name exactly as it appeared on the wire, terminator
/// included. Two questions are equal only when those bytes match exactly:
/// there is no case folding, so `Example.COM` and `example.com` are
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Box<[u8]>,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub const CLASS_IN: u16 = 1;

    pub fn new(name: impl Into<Box<[u8]>>, qtype: u16, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass,
        }
    }

    /// Polynomial hash over (type, class) and every byte of the encoded
    /// name, reduced modulo a fixed prime.
    pub fn hash_code(&self) -> u32 {
        let seed = ((self.qtype as u64) << 16) + self.qclass as u64;
        let h = self.name.iter().fold(seed, |h, &b| {
            (h * HASH_MULTIPLIER + b as u64) % HASH_MODULUS
        });
        h as u32
    }

    pub fn record_type(&self) -> RecordType {
        RecordType::from(self.qtype)
    }

    /// Length of the question section entry on the wire: name plus
    /// the two 16-bit type and class fields.
    pub fn wire_len(&self) -> usize {
        self.name.len() + 4
    }
}

impl Hash for Question {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}
