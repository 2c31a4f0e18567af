use dnsrelay_domain::Session;

/// Number of distinct 16-bit transaction ids.
pub const ID_SPACE: usize = 1 << 16;

/// Maps upstream transaction ids back to the client that asked.
///
/// Ids are handed out round-robin from a cursor that starts at 0 and wraps
/// after 65535. A slot is overwritten when the cursor comes back around, so
/// a response arriving after 65536 newer queries resolves to whichever
/// session took its id last.
pub struct QueryMultiplexer {
    slots: Box<[Option<Session>]>,
    cursor: u16,
}

impl QueryMultiplexer {
    pub fn new() -> Self {
        Self {
            slots: vec![None; ID_SPACE].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Stores `session` under the next id and returns that id.
    pub fn allocate(&mut self, session: Session) -> u16 {
        let id = self.cursor;
        self.slots[id as usize] = Some(session);
        self.cursor = self.cursor.wrapping_add(1);
        id
    }

    /// The session most recently stored under `id`, if any. The slot is
    /// left in place.
    #[inline]
    pub fn resolve(&self, id: u16) -> Option<Session> {
        self.slots[id as usize]
    }

    /// The id the next `allocate` will hand out.
    #[inline]
    pub fn next_id(&self) -> u16 {
        self.cursor
    }
}

impl Default for QueryMultiplexer {
    fn default() -> Self {
        Self::new()
    }
}
