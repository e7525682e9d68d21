//! Async composite: concurrency, supersession and external check faults.

#![cfg(feature = "async")]

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::init_tracing;
use fieldcheck_validator::prelude::*;
use pretty_assertions::assert_eq;
use tokio::sync::Barrier;
use tokio::time::sleep;

/// Email schema whose uniqueness check answers slowly for `slow@example.com`,
/// rejects `taken@example.com` and counts every answer it gives.
fn email_schema(answers: &Arc<AtomicUsize>) -> AsyncValidationComposite {
    let answers = Arc::clone(answers);
    let email = AsyncValidationBuilder::field("email")
        .rules(|b| b.required().email())
        .check(move |email: String| {
            let answers = Arc::clone(&answers);
            async move {
                let delay = if email == "slow@example.com" { 500 } else { 20 };
                sleep(Duration::from_millis(delay)).await;
                answers.fetch_add(1, Ordering::SeqCst);
                Ok::<_, CheckError>(email != "taken@example.com")
            }
        })
        .message("Email already registered")
        .build()
        .unwrap();

    AsyncValidationComposite::build(rules![email]).unwrap()
}

// ============================================================================
// LATEST WINS
// ============================================================================

#[tokio::test(start_paused = true)]
async fn newer_pass_supersedes_slower_older_pass() {
    init_tracing();
    let answers = Arc::new(AtomicUsize::new(0));
    let schema = email_schema(&answers);

    let (older, newer) = tokio::join!(
        schema.validate(&[("email", "slow@example.com")]),
        schema.validate(&[("email", "taken@example.com")]),
    );

    assert!(older.is_superseded());
    let report = newer.report().unwrap();
    assert_eq!(report.get("email").unwrap().message, "Email already registered");

    // The older check was cancelled before it could answer
    assert_eq!(answers.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn sequential_passes_both_complete() {
    let answers = Arc::new(AtomicUsize::new(0));
    let schema = email_schema(&answers);

    let first = schema.validate(&[("email", "taken@example.com")]).await;
    let second = schema.validate(&[("email", "free@example.com")]).await;

    assert!(first.report().unwrap().contains("email"));
    assert!(second.is_valid());
    assert_eq!(answers.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn keystroke_supersedes_field_check() {
    let answers = Arc::new(AtomicUsize::new(0));
    let schema = email_schema(&answers);

    let (older, newer) = tokio::join!(
        schema.validate_field("email", "slow@example.com"),
        schema.validate_field("email", "free@example.com"),
    );

    assert_eq!(older, Outcome::Superseded);
    assert_eq!(newer, Outcome::Complete(Ok(())));
}

#[tokio::test(start_paused = true)]
async fn clones_share_supersession() {
    let answers = Arc::new(AtomicUsize::new(0));
    let schema = email_schema(&answers);
    let clone = schema.clone();

    let (older, newer) = tokio::join!(
        schema.validate_field("email", "slow@example.com"),
        clone.validate_field("email", "free@example.com"),
    );

    assert!(older.is_superseded());
    assert!(!newer.is_superseded());
}

#[tokio::test(start_paused = true)]
async fn superseding_one_field_stops_the_rest_of_the_pass() {
    let answers = Arc::new(AtomicUsize::new(0));
    let slow = |field: &'static str| {
        let answers = Arc::clone(&answers);
        AsyncValidationBuilder::field(field)
            .check(move |_value: String| {
                let answers = Arc::clone(&answers);
                async move {
                    sleep(Duration::from_millis(500)).await;
                    answers.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, CheckError>(true)
                }
            })
            .build()
            .unwrap()
    };
    let cpf = ValidationBuilder::field("cpf").required().build().unwrap();
    let schema =
        AsyncValidationComposite::from_chains([slow("email"), AsyncChain::from(cpf)]).unwrap();

    let (pass, keystroke) = tokio::join!(
        schema.validate(&[("email", "ana@example.com"), ("cpf", "")]),
        schema.validate_field("cpf", "529.982.247-25"),
    );

    assert!(pass.is_superseded());
    assert_eq!(keystroke, Outcome::Complete(Ok(())));
    // The email check of the superseded pass was cancelled, not awaited
    assert_eq!(answers.load(Ordering::SeqCst), 0);
}

// ============================================================================
// CHAIN SEMANTICS
// ============================================================================

#[tokio::test(start_paused = true)]
async fn failing_sync_rule_skips_external_check() {
    let answers = Arc::new(AtomicUsize::new(0));
    let schema = email_schema(&answers);

    let outcome = schema.validate(&[("email", "not-an-email")]).await;

    assert_eq!(outcome.report().unwrap().get("email").unwrap().code, "invalid_email");
    assert_eq!(answers.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn fields_are_checked_concurrently() {
    // Each check waits until both have started; sequential evaluation
    // would hang until the timeout and report the fields as unavailable.
    let barrier = Arc::new(Barrier::new(2));
    let chain = |field: &'static str| {
        let barrier = Arc::clone(&barrier);
        AsyncValidationBuilder::field(field)
            .check(move |_value: String| {
                let barrier = Arc::clone(&barrier);
                async move {
                    barrier.wait().await;
                    Ok::<_, CheckError>(true)
                }
            })
            .build()
            .unwrap()
    };
    let schema = AsyncValidationComposite::from_chains([chain("cpf"), chain("email")]).unwrap();

    let outcome = schema.validate(&[("cpf", "x"), ("email", "y")]).await;
    assert!(outcome.is_valid(), "{outcome:?}");
}

#[tokio::test(start_paused = true)]
async fn external_checks_respect_concurrency_limit() {
    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let chain = |field: &'static str| {
        let active = Arc::clone(&active);
        let peak = Arc::clone(&peak);
        AsyncValidationBuilder::field(field)
            .check(move |_value: String| {
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    sleep(Duration::from_millis(10)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, CheckError>(true)
                }
            })
            .build()
            .unwrap()
    };
    let config = AsyncValidationConfig::default().with_max_concurrent_checks(1);
    let schema =
        AsyncValidationComposite::from_chains_with_config([chain("a"), chain("b"), chain("c")], config)
            .unwrap();

    assert!(schema.validate(&[("a", ""), ("b", ""), ("c", "")]).await.is_valid());
    assert_eq!(peak.load(Ordering::SeqCst), 1);
}

// ============================================================================
// EXTERNAL CHECK FAULTS
// ============================================================================

#[tokio::test(start_paused = true)]
async fn timed_out_check_reports_unavailable() {
    let slow = AsyncValidationBuilder::field("username")
        .check(|_value: String| async {
            sleep(Duration::from_secs(60)).await;
            Ok::<_, CheckError>(true)
        })
        .build()
        .unwrap();
    let config = AsyncValidationConfig::default().with_check_timeout(Duration::from_millis(100));
    let schema = AsyncValidationComposite::build_with_config(rules![slow], config).unwrap();

    let outcome = schema.validate(&[("username", "ana")]).await;
    let report = outcome.report().unwrap();
    let error = report.get("username").unwrap();

    assert_eq!(error.kind, ErrorKind::CheckUnavailable);
    assert_eq!(error.code, "check_unavailable");
    assert_eq!(error.field(), Some("username"));
    assert_eq!(error.param("reason"), Some("external check timed out after 100ms"));
    assert!(report.has_unavailable_checks());
}

#[tokio::test]
async fn failing_check_reports_unavailable() {
    let broken = AsyncValidationBuilder::field("username")
        .check(|_value: String| async { Err::<bool, _>(CheckError::failed("connection refused")) })
        .message("Username taken")
        .build()
        .unwrap();
    let schema = AsyncValidationComposite::build(rules![broken]).unwrap();

    let outcome = schema.validate_field("username", "ana").await;
    let error = outcome.into_complete().unwrap().unwrap_err();

    assert!(error.is_check_unavailable());
    // The rejection message does not mask an outage
    assert_ne!(error.message, "Username taken");
}

#[tokio::test]
async fn lifted_sync_chain_behaves_like_the_sync_composite() {
    let cep = ValidationBuilder::field("cep").required().cep().build().unwrap();
    let schema = AsyncValidationComposite::from_chains([AsyncChain::from(cep)]).unwrap();

    assert!(schema.validate(&[("cep", "01310-930")]).await.is_valid());
    let outcome = schema.validate(&[("cep", "abcde-fgh")]).await;
    assert_eq!(outcome.report().unwrap().get("cep").unwrap().code, "invalid_cep");
}
