//! Request generations.
//!
//! Each controller issues a [`Ticket`] per request and only applies a response
//! whose ticket is still the latest one. A slow response that resolves after a
//! newer one is dropped instead of overwriting fresher state.

/// Token identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Monotonic generation counter for one request slot
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket {
            generation: self.latest,
        }
    }

    /// Whether a response carrying `ticket` may still be applied
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.latest
    }

    /// Supersede everything in flight without issuing a new request
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
