//! Email address validation with time-bounded matching.
//!
//! Validation runs in two stages, each under its own deadline:
//!
//! 1. **Domain normalization**: the text after the first `@` (through end of
//!    input) is converted to its IDNA ASCII form. Conversion failure fails
//!    validation.
//! 2. **Shape check**: the normalized string must look like
//!    `local@domain.tld`, with no `@` or whitespace inside any part.
//!
//! Timeouts, conversion failures and shape failures all report `false`;
//! callers cannot tell them apart.

use super::bounded::{run_bounded, StageOutcome};
use crate::config::Config;
use crate::observability::MetricsTracker;
use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use std::time::{Duration, Instant};
use tracing::debug;

/// Separator plus everything after it, anchored at end of input.
static DOMAIN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(@)(.+)$").expect("Failed to compile email domain regex"));

static SHAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .case_insensitive(true)
        .build()
        .expect("Failed to compile email shape regex")
});

const MAX_LABEL_LEN: usize = 63;
const MAX_DOMAIN_LEN: usize = 253;
/// Longest address accepted, in octets. Longer input never reaches the stages.
const MAX_EMAIL_LEN: usize = 254;

/// Outcome of validating one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The address passed; carries the domain-normalized form
    Valid(String),
    Invalid,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn normalized(&self) -> Option<&str> {
        match self {
            Self::Valid(email) => Some(email),
            Self::Invalid => None,
        }
    }
}

/// Convert a domain to its ASCII-compatible form.
///
/// Returns `None` for anything IDNA rejects, empty labels, labels over 63
/// octets and names over 253 octets. A single trailing root dot is allowed.
pub fn to_ascii_domain(domain: &str) -> Option<String> {
    let ascii = idna::domain_to_ascii(domain).ok()?;
    let name = ascii.strip_suffix('.').unwrap_or(&ascii);

    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return None;
    }
    if !name
        .split('.')
        .all(|label| !label.is_empty() && label.len() <= MAX_LABEL_LEN)
    {
        return None;
    }

    Some(ascii)
}

/// Replacement text for a domain match: the separator followed by the ASCII domain.
pub fn domain_replacement(caps: &Captures<'_>) -> Option<String> {
    let domain = to_ascii_domain(&caps[2])?;
    Some(format!("{}{}", &caps[1], domain))
}

/// Rewrite the domain of `email` into ASCII form.
///
/// Input without a domain (no `@`, or nothing after it) is returned unchanged.
/// Returns `None` when the domain cannot be converted.
pub fn normalize_domain(email: &str) -> Option<String> {
    let Some(caps) = DOMAIN_REGEX.captures(email) else {
        return Some(email.to_string());
    };
    let whole = caps.get(0)?;
    let replacement = domain_replacement(&caps)?;

    let mut normalized = String::with_capacity(whole.start() + replacement.len());
    normalized.push_str(&email[..whole.start()]);
    normalized.push_str(&replacement);
    Some(normalized)
}

/// Whether `email` has the `local@domain.tld` shape.
pub fn has_email_shape(email: &str) -> bool {
    SHAPE_REGEX.is_match(email)
}

/// Validates email addresses under per-stage time budgets.
///
/// Cheap to clone; every call is independent, so one validator can serve
/// any number of concurrent tasks.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    domain_budget: Duration,
    pattern_budget: Duration,
    metrics: MetricsTracker,
}

impl EmailValidator {
    pub const DEFAULT_DOMAIN_BUDGET: Duration = Duration::from_millis(200);
    pub const DEFAULT_PATTERN_BUDGET: Duration = Duration::from_millis(250);

    /// Create a validator with explicit stage budgets.
    pub fn new(domain_budget: Duration, pattern_budget: Duration) -> Self {
        Self {
            domain_budget,
            pattern_budget,
            metrics: MetricsTracker::new(),
        }
    }

    /// Create a validator using the budgets from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.email_domain_timeout(), config.email_pattern_timeout())
    }

    /// Report validations to a shared metrics tracker.
    pub fn with_metrics(mut self, metrics: MetricsTracker) -> Self {
        self.metrics = metrics;
        self
    }

    /// Upper bound on how long [`validate`](Self::validate) waits, excluding scheduling overhead.
    pub fn total_budget(&self) -> Duration {
        self.domain_budget + self.pattern_budget
    }

    /// Returns true if `raw` is a well-formed email address.
    pub async fn validate(&self, raw: &str) -> bool {
        self.check(raw).await.is_valid()
    }

    /// Validate `raw`, returning the normalized address on success.
    pub async fn check(&self, raw: &str) -> ValidationOutcome {
        let started = Instant::now();
        if raw.len() > MAX_EMAIL_LEN {
            debug!(len = raw.len(), "Email address too long");
            return self.finish(started, ValidationOutcome::Invalid, false);
        }
        let raw = raw.to_string();

        let normalized = match run_bounded("email_domain", self.domain_budget, move || {
            normalize_domain(&raw)
        })
        .await
        {
            StageOutcome::Completed(Some(normalized)) => normalized,
            StageOutcome::Completed(None) => {
                debug!("Email domain could not be converted to ASCII");
                return self.finish(started, ValidationOutcome::Invalid, false);
            }
            outcome => {
                let timed_out = outcome.is_timed_out();
                return self.finish(started, ValidationOutcome::Invalid, timed_out);
            }
        };

        match run_bounded("email_shape", self.pattern_budget, move || {
            let matched = has_email_shape(&normalized);
            (matched, normalized)
        })
        .await
        {
            StageOutcome::Completed((true, normalized)) => {
                self.finish(started, ValidationOutcome::Valid(normalized), false)
            }
            StageOutcome::Completed((false, _)) => {
                self.finish(started, ValidationOutcome::Invalid, false)
            }
            outcome => {
                let timed_out = outcome.is_timed_out();
                self.finish(started, ValidationOutcome::Invalid, timed_out)
            }
        }
    }

    fn finish(
        &self,
        started: Instant,
        outcome: ValidationOutcome,
        timed_out: bool,
    ) -> ValidationOutcome {
        self.metrics.track_email_validation(
            started.elapsed().as_millis(),
            outcome.is_valid(),
            timed_out,
        );
        outcome
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DOMAIN_BUDGET, Self::DEFAULT_PATTERN_BUDGET)
    }
}
