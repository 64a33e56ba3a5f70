//! Directory metrics tracking.
//!
//! Counters for queries, validations and rejected writes, each tracked
//! operation also emitting a `tracing` event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared metrics tracker. Clones share the same counters.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    contact_queries_total: Arc<AtomicU64>,
    contacts_returned_total: Arc<AtomicU64>,
    email_validations_total: Arc<AtomicU64>,
    email_rejections_total: Arc<AtomicU64>,
    email_timeouts_total: Arc<AtomicU64>,
    rejected_writes_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            contact_queries_total: Arc::new(AtomicU64::new(0)),
            contacts_returned_total: Arc::new(AtomicU64::new(0)),
            email_validations_total: Arc::new(AtomicU64::new(0)),
            email_rejections_total: Arc::new(AtomicU64::new(0)),
            email_timeouts_total: Arc::new(AtomicU64::new(0)),
            rejected_writes_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a filtered contact query.
    pub fn track_contact_query(&self, scope: &str, duration_ms: u128, result_count: usize) {
        self.contact_queries_total.fetch_add(1, Ordering::Relaxed);
        self.contacts_returned_total
            .fetch_add(result_count as u64, Ordering::Relaxed);

        tracing::info!(
            scope = %scope,
            duration_ms = duration_ms,
            result_count = result_count,
            "Contact query completed"
        );
    }

    /// Track an email validation. `timed_out` implies `!valid`.
    pub fn track_email_validation(&self, duration_ms: u128, valid: bool, timed_out: bool) {
        self.email_validations_total.fetch_add(1, Ordering::Relaxed);

        if !valid {
            self.email_rejections_total.fetch_add(1, Ordering::Relaxed);
        }
        if timed_out {
            self.email_timeouts_total.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            duration_ms = duration_ms,
            valid = valid,
            timed_out = timed_out,
            "Email validation completed"
        );
    }

    /// Track a create/update refused before reaching the store.
    pub fn track_rejected_write(&self, operation: &str, reason: &str) {
        self.rejected_writes_total.fetch_add(1, Ordering::Relaxed);
        tracing::info!(operation = %operation, reason = %reason, "Contact write rejected");
    }

    pub fn contact_queries_total(&self) -> u64 {
        self.contact_queries_total.load(Ordering::Relaxed)
    }

    pub fn contacts_returned_total(&self) -> u64 {
        self.contacts_returned_total.load(Ordering::Relaxed)
    }

    pub fn email_validations_total(&self) -> u64 {
        self.email_validations_total.load(Ordering::Relaxed)
    }

    pub fn email_rejections_total(&self) -> u64 {
        self.email_rejections_total.load(Ordering::Relaxed)
    }

    pub fn email_timeouts_total(&self) -> u64 {
        self.email_timeouts_total.load(Ordering::Relaxed)
    }

    pub fn rejected_writes_total(&self) -> u64 {
        self.rejected_writes_total.load(Ordering::Relaxed)
    }

    /// Get the email rejection rate (0.0 to 1.0).
    pub fn email_rejection_rate(&self) -> f64 {
        let rejected = self.email_rejections_total() as f64;
        let total = self.email_validations_total() as f64;

        if total == 0.0 {
            0.0
        } else {
            rejected / total
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Contact Queries: {}\n\
             Contacts Returned: {}\n\
             Email Validations: {}\n\
             Email Rejections: {} ({:.2}% rejection rate)\n\
             Email Timeouts: {}\n\
             Rejected Writes: {}",
            self.contact_queries_total(),
            self.contacts_returned_total(),
            self.email_validations_total(),
            self.email_rejections_total(),
            self.email_rejection_rate() * 100.0,
            self.email_timeouts_total(),
            self.rejected_writes_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}
