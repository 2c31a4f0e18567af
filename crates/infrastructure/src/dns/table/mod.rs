//! Answer storage: permanent overrides plus a bounded LRU of upstream
//! responses, both keyed by the exact question.

pub mod builder;
pub mod entry;
pub mod hosts;

pub use builder::{EMPTY_RESPONSE_TTL, STATIC_RECORD_TTL};
pub use entry::{EntryKind, Freshness, TableEntry};
pub use hosts::{parse_static_hosts, StaticHost, StaticHostsReport};

use dnsrelay_domain::Question;
use lru::LruCache;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::debug;

/// Static overrides and cached answers.
///
/// Static entries are not counted against `capacity` and never leave
/// through eviction. Cached entries are kept in recency order: a
/// successful `lookup` promotes, an `insert` beyond capacity drops the
/// least recently used one. A question has at most one entry of each kind.
pub struct AnswerTable {
    statics: FxHashMap<Question, TableEntry>,
    cache: LruCache<Question, TableEntry, FxBuildHasher>,
    capacity: usize,
}

impl AnswerTable {
    /// Empty table holding at most `capacity` cached entries. Zero
    /// disables caching; static entries are still accepted.
    pub fn new(capacity: usize) -> Self {
        Self {
            statics: FxHashMap::default(),
            cache: LruCache::unbounded_with_hasher(FxBuildHasher::default()),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    pub fn static_len(&self) -> usize {
        self.statics.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statics.len() + self.cache.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_static(&self, question: &Question) -> bool {
        self.statics.contains_key(question)
    }

    /// Presence check that does not touch recency.
    pub fn contains(&self, question: &Question) -> bool {
        self.statics.contains_key(question) || self.cache.contains(question)
    }

    /// Stores `entry` under its question, replacing any entry of the same
    /// kind. Returns the cached entry evicted to make room, if any.
    pub fn insert(&mut self, entry: TableEntry) -> Option<TableEntry> {
        if entry.is_static() {
            self.statics.insert(entry.question.clone(), entry);
            return None;
        }

        if self.capacity == 0 {
            return None;
        }

        if self.cache.pop(&entry.question).is_none() && self.cache.len() >= self.capacity {
            let evicted = self.cache.pop_lru().map(|(_, evicted)| evicted);
            if evicted.is_some() {
                debug!(capacity = self.capacity, "Answer cache full, evicted LRU entry");
            }
            self.cache.put(entry.question.clone(), entry);
            return evicted;
        }

        self.cache.put(entry.question.clone(), entry);
        None
    }

    /// Finds the entry for `question`. Static entries win over cached ones;
    /// a cached hit becomes the most recently used.
    pub fn lookup(&mut self, question: &Question) -> Option<&TableEntry> {
        if let Some(entry) = self.statics.get(question) {
            return Some(entry);
        }
        self.cache.get(question)
    }

    /// Removes the cached entry for `question`, or the static one when no
    /// cached entry exists.
    pub fn delete(&mut self, question: &Question) -> Option<TableEntry> {
        self.cache
            .pop(question)
            .or_else(|| self.statics.remove(question))
    }

    /// Cached questions from least to most recently used.
    pub fn cache_questions_lru_first(&self) -> impl Iterator<Item = &Question> {
        self.cache.iter().rev().map(|(question, _)| question)
    }
}
