//! Trailing-edge debounce bookkeeping.
//!
//! The browser side schedules one timer per event and drops the previous one;
//! this type decides which timer is still allowed to act when it fires. Only
//! the most recently issued ticket settles, and it settles once.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

/// Proof that an event was scheduled; redeemed when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Debouncer {
    issued: u64,
    settled: u64,
}

impl Debouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new event, superseding every outstanding ticket.
    pub fn trigger(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Whether `ticket` is the latest one and has not settled yet. Marks it settled.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if ticket.0 != self.issued || self.settled == ticket.0 {
            return false;
        }
        self.settled = ticket.0;
        true
    }
}
