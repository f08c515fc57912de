//! Request diagnostics hook.
//!
//! The client reports every request, response and failure to an observer
//! instead of logging through a hard-coded global. [`TracingObserver`] is the
//! default and emits `tracing` events.

use tracing::{debug, warn};

/// Receives diagnostics for every request the client makes
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, method: &str, url: &str);

    fn on_response(&self, status: u16, url: &str);

    /// `status` is `None` when no response was received at all
    fn on_failure(&self, status: Option<u16>, url: &str, reason: &str);
}

/// Observer that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: &str, url: &str) {
        debug!(method, url, "API request");
    }

    fn on_response(&self, status: u16, url: &str) {
        debug!(status, url, "API response");
    }

    fn on_failure(&self, status: Option<u16>, url: &str, reason: &str) {
        warn!(?status, url, reason, "API request failed");
    }
}
