//! End-to-end submission lifecycle tests for the orchestrator.

use std::sync::Arc;
use std::time::Duration;

use logo_studio_core::fakes::ScriptedGenerator;
use logo_studio_core::{
    Classification, ErrorCategory, ImageRef, SkipReason, StudioConfig, SubmissionOrchestrator,
    SubmissionState, SubmitOutcome, UNKNOWN_ERROR_MESSAGE,
};

async fn ready_session(generator: Arc<ScriptedGenerator>) -> Arc<SubmissionOrchestrator> {
    let orch = Arc::new(SubmissionOrchestrator::new(None, generator));
    orch.initialize().await;
    orch
}

fn expect_failed(outcome: SubmitOutcome) -> Classification {
    match outcome {
        SubmitOutcome::Failed(c) => c,
        other => panic!("expected failure, got {other:?}"),
    }
}

async fn wait_in_flight(orch: &SubmissionOrchestrator) {
    let mut rx = orch.subscribe();
    rx.wait_for(|s| s.is_in_flight()).await.unwrap();
}

// ---- preconditions ----

#[tokio::test]
async fn blank_prompts_are_silent_noops() {
    let generator = Arc::new(ScriptedGenerator::new().then_image("img://unused"));
    let orch = ready_session(generator.clone()).await;

    for raw in ["", "   ", "\n\t", " \r\n "] {
        let before = orch.snapshot();
        let outcome = orch.submit(raw).await;
        assert_eq!(outcome, SubmitOutcome::Ignored(SkipReason::EmptyPrompt));
        assert_eq!(orch.snapshot(), before);
    }
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn blank_prompt_after_settlement_keeps_previous_result() {
    let generator = Arc::new(ScriptedGenerator::new().then_image("img://kept"));
    let orch = ready_session(generator).await;

    orch.submit("lighthouse emblem").await;
    orch.submit("    ").await;

    let snap = orch.snapshot();
    assert_eq!(snap.submission, SubmissionState::Succeeded);
    assert_eq!(snap.image(), Some(&ImageRef::new("img://kept")));
}

#[tokio::test]
async fn second_submit_while_in_flight_is_ignored() {
    let generator = Arc::new(ScriptedGenerator::new().gated().then_image("img://first"));
    let orch = ready_session(generator.clone()).await;

    let first = tokio::spawn({
        let orch = orch.clone();
        async move { orch.submit("first prompt").await }
    });
    wait_in_flight(&orch).await;

    let second = orch.submit("second prompt").await;
    assert_eq!(second, SubmitOutcome::Ignored(SkipReason::InFlight));
    assert!(orch.snapshot().is_in_flight());

    generator.release();
    let first = first.await.unwrap();
    assert_eq!(first, SubmitOutcome::Succeeded(ImageRef::new("img://first")));

    assert_eq!(generator.calls(), 1);
    assert_eq!(generator.prompts().await, vec!["first prompt".to_string()]);
}

// ---- settlement ----

#[tokio::test]
async fn scenario_no_host_then_successful_generation() {
    let generator = Arc::new(ScriptedGenerator::new().then_image("img://abc"));
    let orch = SubmissionOrchestrator::new(None, generator);

    assert!(orch.initialize().await.is_ready());

    let outcome = orch.submit("A minimalist mountain logo").await;
    assert_eq!(outcome, SubmitOutcome::Succeeded(ImageRef::new("img://abc")));

    let snap = orch.snapshot();
    assert_eq!(snap.submission, SubmissionState::Succeeded);
    assert_eq!(snap.image(), Some(&ImageRef::new("img://abc")));
    assert!(snap.error_message().is_none());
    assert!(!snap.is_in_flight());
}

#[tokio::test]
async fn failure_is_stored_and_allows_immediate_retry() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .then_failure("The model is overloaded. Try again later.")
            .then_image("img://retry"),
    );
    let orch = ready_session(generator.clone()).await;

    let outcome = orch.submit("hexagon badge").await;
    let c = expect_failed(outcome);
    assert_eq!(c.category, ErrorCategory::Generic);

    let snap = orch.snapshot();
    assert_eq!(snap.submission, SubmissionState::Failed);
    assert_eq!(
        snap.error_message(),
        Some("The model is overloaded. Try again later.")
    );
    assert!(snap.image().is_none());
    assert!(orch.is_credential_ready());

    let retry = orch.submit("hexagon badge").await;
    assert!(matches!(retry, SubmitOutcome::Succeeded(_)));
    assert!(orch.snapshot().error_message().is_none());
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn new_submission_clears_previous_image_before_resolving() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .gated()
            .then_image("img://old")
            .then_image("img://new"),
    );
    let orch = ready_session(generator.clone()).await;

    generator.release();
    orch.submit("first").await;
    assert_eq!(orch.snapshot().image(), Some(&ImageRef::new("img://old")));

    let pending = tokio::spawn({
        let orch = orch.clone();
        async move { orch.submit("second").await }
    });
    wait_in_flight(&orch).await;

    let snap = orch.snapshot();
    assert!(snap.image().is_none());
    assert!(snap.error_message().is_none());

    generator.release();
    pending.await.unwrap();
    assert_eq!(orch.snapshot().image(), Some(&ImageRef::new("img://new")));
}

#[tokio::test]
async fn new_submission_clears_previous_error_before_resolving() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .gated()
            .then_failure("backend unavailable")
            .then_image("img://fine"),
    );
    let orch = ready_session(generator.clone()).await;

    generator.release();
    orch.submit("first").await;
    assert_eq!(orch.snapshot().error_message(), Some("backend unavailable"));

    let pending = tokio::spawn({
        let orch = orch.clone();
        async move { orch.submit("second").await }
    });
    wait_in_flight(&orch).await;
    assert!(orch.snapshot().error_message().is_none());

    generator.release();
    pending.await.unwrap();
    assert_eq!(orch.snapshot().submission, SubmissionState::Succeeded);
}

// ---- in-flight flag is always cleared ----

#[tokio::test]
async fn panicking_generator_does_not_leave_session_in_flight() {
    let generator = Arc::new(
        ScriptedGenerator::new()
            .then_panic("generator exploded")
            .then_image("img://after"),
    );
    let orch = ready_session(generator).await;

    let handle = tokio::spawn({
        let orch = orch.clone();
        async move { orch.submit("doomed").await }
    });
    assert!(handle.await.unwrap_err().is_panic());

    let snap = orch.snapshot();
    assert!(!snap.is_in_flight());
    assert_eq!(snap.submission, SubmissionState::Failed);
    assert_eq!(snap.error_message(), Some(UNKNOWN_ERROR_MESSAGE));

    let next = orch.submit("second chance").await;
    assert_eq!(next, SubmitOutcome::Succeeded(ImageRef::new("img://after")));
}

#[tokio::test(start_paused = true)]
async fn dropped_submission_clears_in_flight() {
    let generator = Arc::new(ScriptedGenerator::new().then_hang());
    let orch = ready_session(generator).await;

    let abandoned = tokio::time::timeout(Duration::from_secs(5), orch.submit("never")).await;
    assert!(abandoned.is_err());

    let snap = orch.snapshot();
    assert!(!snap.is_in_flight());
    assert!(snap.settled_at.is_some());
}

#[tokio::test(start_paused = true)]
async fn configured_timeout_fails_the_submission() {
    let generator = Arc::new(ScriptedGenerator::new().then_hang());
    let config = StudioConfig::default().with_generation_timeout(Duration::from_secs(30));
    let orch = SubmissionOrchestrator::new(None, generator.clone()).with_config(&config);
    orch.initialize().await;

    let outcome = orch.submit("slow request").await;
    let c = expect_failed(outcome);
    assert_eq!(c.category, ErrorCategory::Generic);
    assert_eq!(c.message, "Logo generation timed out after 30s");
    assert!(!orch.snapshot().is_in_flight());
    assert_eq!(generator.calls(), 1);
}

// ---- presentation stream ----

#[tokio::test]
async fn subscribers_see_in_flight_then_settled() {
    let generator = Arc::new(ScriptedGenerator::new().gated().then_image("img://stream"));
    let orch = ready_session(generator.clone()).await;
    let mut rx = orch.subscribe();

    let pending = tokio::spawn({
        let orch = orch.clone();
        async move { orch.submit("streamed").await }
    });

    rx.wait_for(|s| s.is_in_flight()).await.unwrap();
    generator.release();
    let settled = rx
        .wait_for(|s| s.submission.is_settled())
        .await
        .unwrap()
        .clone();
    pending.await.unwrap();

    assert_eq!(settled.image(), Some(&ImageRef::new("img://stream")));
}
