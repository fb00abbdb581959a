//! Per-invocation batch accounting.

/// Completion bookkeeping for one batch of dispatched uploads.
///
/// Created when a job invocation starts and discarded once the completion
/// report is out. Only outcome handling mutates it, always under the
/// orchestrator's batch lock.
#[derive(Debug)]
pub struct BatchState {
    /// Number of uploads dispatched by this invocation.
    total_dispatched: usize,
    /// Dispatched uploads that have not yet reported a terminal outcome.
    remaining_to_report: usize,
    /// Retryable failures: items left queued for a future run.
    pending_failures: usize,
    /// Whether the completion report has been claimed.
    reported: bool,
}

impl BatchState {
    /// Create accounting for a batch of `total` dispatched uploads.
    pub fn new(total: usize) -> Self {
        Self {
            total_dispatched: total,
            remaining_to_report: total,
            pending_failures: 0,
            reported: false,
        }
    }

    /// Number of uploads dispatched by this invocation.
    pub fn total_dispatched(&self) -> usize {
        self.total_dispatched
    }

    /// Dispatched uploads still awaiting a terminal outcome.
    pub fn remaining_to_report(&self) -> usize {
        self.remaining_to_report
    }

    /// Whether every dispatched upload has reported.
    pub fn is_complete(&self) -> bool {
        self.remaining_to_report == 0
    }

    /// Record one terminal outcome.
    ///
    /// `retryable_failure` marks outcomes that leave the item queued for a
    /// future run; successes and abandoned items (missing file) pass `false`.
    /// Returns `Some(needs_reschedule)` exactly once, for the outcome that
    /// completes the batch — the caller must then emit the completion report.
    pub fn record_terminal(&mut self, retryable_failure: bool) -> Option<bool> {
        if self.remaining_to_report == 0 {
            // A duplicate outcome for an already-drained batch lands here.
            return None;
        }
        self.remaining_to_report -= 1;
        if retryable_failure {
            self.pending_failures += 1;
        }
        if self.remaining_to_report == 0 && !self.reported {
            self.reported = true;
            return Some(self.pending_failures > 0);
        }
        None
    }
}
