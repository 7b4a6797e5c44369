//! Structured observability hooks for the credential and submission
//! lifecycles.
//!
//! Every event carries an `event = "..."` field so log pipelines can filter
//! on it. For JSON output see [`init_tracing`](crate::telemetry::init_tracing).

use tracing::{debug, error, info, warn};

use crate::classify::Classification;
use crate::credential::CredentialState;
use crate::domain::{SkipReason, SubmissionId, SubmissionState};
use crate::host::HostError;

/// Span wrapping one submission; attach with `tracing::Instrument`.
pub fn submission_span(id: SubmissionId) -> tracing::Span {
    tracing::info_span!("logo_studio.submission", submission_id = %id)
}

/// Emit event: startup probe answered by the host.
pub fn emit_credential_probed(has_key: bool) {
    info!(event = "credential.probed", has_key = has_key);
}

/// Emit event: no host capability, readiness assumed (warning level).
pub fn emit_capability_absent(assumed_ready: bool) {
    warn!(
        event = "credential.capability_absent",
        assumed_ready = assumed_ready,
        "host credential capability not found; assuming credentials are supplied by the environment"
    );
}

/// Emit event: host probe failed (error level).
pub fn emit_probe_failed(err: &HostError) {
    error!(event = "credential.probe_failed", error = %err);
}

/// Emit event: picker could not be used.
pub fn emit_picker_failed(err: &HostError) {
    warn!(event = "credential.picker_failed", error = %err);
}

/// Emit event: credential gate transition.
pub fn emit_gate_changed(from: CredentialState, to: CredentialState) {
    info!(event = "credential.gate_changed", from = %from, to = %to);
}

/// Emit event: submission accepted and sent to the generator.
pub fn emit_submission_started(id: SubmissionId, prompt_chars: usize) {
    info!(
        event = "submission.started",
        submission_id = %id,
        prompt_chars = prompt_chars,
    );
}

/// Emit event: submit call was a no-op.
pub fn emit_submission_ignored(reason: SkipReason) {
    debug!(event = "submission.ignored", reason = %reason);
}

/// Emit event: submission settled.
pub fn emit_submission_settled(id: SubmissionId, state: SubmissionState, duration_ms: u64) {
    info!(
        event = "submission.settled",
        submission_id = %id,
        state = %state,
        duration_ms = duration_ms,
    );
}

/// Emit event: in-flight flag cleared without a settlement (warning level).
pub fn emit_submission_abandoned(id: SubmissionId) {
    warn!(event = "submission.abandoned", submission_id = %id);
}

/// Emit event: failure classified.
pub fn emit_failure_classified(classifier_version: &str, classification: &Classification) {
    info!(
        event = "failure.classified",
        classifier = %classifier_version,
        category = %classification.category,
        gate_action = ?classification.gate_action,
    );
}
