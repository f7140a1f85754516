use tokio_util::sync::CancellationToken;

/// Handle given to a spawned fetch. The task must stop when `token` is cancelled,
/// and its result only counts if `generation` is still current when it lands.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    pub generation: u64,
    pub token: CancellationToken,
}

/// At most one request in flight per slot. Starting a new one cancels the previous.
#[derive(Debug, Default)]
pub struct RequestSlot {
    generation: u64,
    token: Option<CancellationToken>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.cancel();
        self.generation += 1;
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        RequestTicket {
            generation: self.generation,
            token,
        }
    }

    /// Cancel whatever is in flight. Returns true if something was.
    pub fn cancel(&mut self) -> bool {
        match self.token.take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.token.is_some() && generation == self.generation
    }

    /// Mark the request as settled. False means the response is stale and must be dropped.
    pub fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.token = None;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.token.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_cancels_previous() {
        let mut slot = RequestSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(first.token.is_cancelled());
        assert!(!second.token.is_cancelled());
        assert!(!slot.is_current(first.generation));
        assert!(slot.is_current(second.generation));
    }

    #[test]
    fn test_finish_only_accepts_current() {
        let mut slot = RequestSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(!slot.finish(first.generation));
        assert!(slot.in_flight());
        assert!(slot.finish(second.generation));
        assert!(!slot.in_flight());
        // Settling twice is a no-op
        assert!(!slot.finish(second.generation));
    }

    #[test]
    fn test_cancel_makes_everything_stale() {
        let mut slot = RequestSlot::new();
        let ticket = slot.begin();
        assert!(slot.cancel());
        assert!(ticket.token.is_cancelled());
        assert!(!slot.finish(ticket.generation));
        assert!(!slot.cancel());
    }
}
