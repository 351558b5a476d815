//! Frame-coalesced recomputation.
//!
//! Scroll and resize signals can arrive many times per frame. The scheduler
//! keeps a single pending flag: the first [`FrameScheduler::notify`] asks the
//! host to schedule one deferred pass, later calls are no-ops until that pass
//! has run.

/// Pending flag plus deferred-task bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: bool,
    notifications: u64,
    passes: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a geometry-affecting signal.
    ///
    /// Returns true when the caller must request a deferred pass (the next
    /// animation frame); false when one is already pending.
    pub fn notify(&mut self) -> bool {
        self.notifications += 1;
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called from the deferred task. Clears the flag and returns whether a
    /// recomputation pass should run.
    pub fn take_pending(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.passes += 1;
        log::trace!(
            "Frame pass #{} ({} notifications so far)",
            self.passes,
            self.notifications
        );
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total number of `notify` calls.
    pub fn notifications(&self) -> u64 {
        self.notifications
    }

    /// Total number of passes that actually ran.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
