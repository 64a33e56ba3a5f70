//! Observability module for monitoring and metrics.
//!
//! Counters for directory queries and validations, paired with structured
//! `tracing` events.

pub mod metrics;

pub use metrics::{MetricsTracker, Timer};
