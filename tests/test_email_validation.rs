//! Integration tests for email validation.

use contact_directory::{EmailValidator, MetricsTracker, ValidationOutcome};
use std::time::{Duration, Instant};

/// Scheduling slack allowed on top of the validator's own budgets.
const OVERHEAD: Duration = Duration::from_secs(1);

#[tokio::test]
async fn test_accepts_ordinary_addresses() {
    let validator = EmailValidator::default();
    for email in [
        "david.rose@roseapothecary.com",
        "leslie.knope@gryzzl.com",
        "first+tag@sub.example.co.uk",
        "MixedCase@Example.COM",
    ] {
        assert!(validator.validate(email).await, "expected valid: {email}");
    }
}

#[tokio::test]
async fn test_rejects_malformed_addresses() {
    let validator = EmailValidator::default();
    for email in [
        "",
        "plainaddress",
        "user@",
        "@example.com",
        "user@localhost",
        "user@@example.com",
        "user@host@example.com",
        "user @example.com",
        "user@ example.com",
        " user@example.com",
        "user@example.com ",
        "user@exa mple.com",
        "user@example.",
    ] {
        assert!(!validator.validate(email).await, "expected invalid: {email:?}");
    }
}

#[tokio::test]
async fn test_rejects_trailing_newline() {
    let validator = EmailValidator::default();
    assert!(!validator.validate("user@example.com\n").await);
}

#[tokio::test]
async fn test_internationalized_domain_is_normalized() {
    let validator = EmailValidator::default();

    let outcome = validator.check("user@例.com").await;
    assert_eq!(
        outcome,
        ValidationOutcome::Valid("user@xn--fsq.com".to_string())
    );

    // Unicode and punycode spellings of the same domain agree
    assert!(validator.validate("user@xn--fsq.com").await);
}

#[tokio::test]
async fn test_domain_case_is_folded_local_part_kept() {
    let validator = EmailValidator::default();
    let outcome = validator.check("Archer@DangerZone.COM").await;
    assert_eq!(outcome.normalized(), Some("Archer@dangerzone.com"));
}

#[tokio::test]
async fn test_rejects_oversized_domain_labels() {
    let validator = EmailValidator::default();
    let label = "a".repeat(64);
    let email = format!("user@{}.com", label);
    assert!(!validator.validate(&email).await);

    let label = "a".repeat(63);
    let email = format!("user@{}.com", label);
    assert!(validator.validate(&email).await);
}

#[tokio::test]
async fn test_adversarial_input_returns_within_budget() {
    let validator = EmailValidator::new(Duration::from_millis(200), Duration::from_millis(250));
    let limit = validator.total_budget() + OVERHEAD;

    let inputs = [
        format!("{}@", "a".repeat(200_000)),
        format!("{}x", "@".repeat(100_000)),
        format!("user@{}", "a.".repeat(100_000)),
        format!("{}!", "a@a.".repeat(50_000)),
    ];

    for input in &inputs {
        let started = Instant::now();
        let valid = validator.validate(input).await;
        assert!(!valid);
        assert!(
            started.elapsed() <= limit,
            "validation took {:?} (limit {:?})",
            started.elapsed(),
            limit
        );
    }
}

#[tokio::test]
async fn test_exhausted_budget_reports_invalid() {
    let metrics = MetricsTracker::new();
    let validator =
        EmailValidator::new(Duration::ZERO, Duration::ZERO).with_metrics(metrics.clone());

    assert!(!validator.validate("david.rose@roseapothecary.com").await);
    assert_eq!(metrics.email_validations_total(), 1);
    assert_eq!(metrics.email_timeouts_total(), 1);
}

#[tokio::test]
async fn test_overlong_address_is_invalid() {
    let validator = EmailValidator::default();
    let email = format!("{}@example.com", "a".repeat(300));
    assert!(!validator.validate(&email).await);
    assert_eq!(validator.metrics().email_timeouts_total(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_validations_are_independent() {
    let metrics = MetricsTracker::new();
    let validator = EmailValidator::default().with_metrics(metrics.clone());

    let mut handles = Vec::new();
    for i in 0..32 {
        let validator = validator.clone();
        handles.push(tokio::spawn(async move {
            let email = if i % 2 == 0 {
                format!("user{}@example.com", i)
            } else {
                format!("user{}-at-example.com", i)
            };
            (i, validator.validate(&email).await)
        }));
    }

    for handle in handles {
        let (i, valid) = handle.await.unwrap();
        assert_eq!(valid, i % 2 == 0, "wrong result for request {i}");
    }

    assert_eq!(metrics.email_validations_total(), 32);
    assert_eq!(metrics.email_rejections_total(), 16);
    assert_eq!(metrics.email_timeouts_total(), 0);
}
