//! Logo Studio Core Library
//!
//! Request orchestration for prompt-to-logo generation: credential gating,
//! submission lifecycle and failure classification. Rendering and the network
//! transport live outside this crate, behind the [`HostCapability`] and
//! [`LogoGenerator`] ports.

pub mod classify;
pub mod config;
pub mod credential;
pub mod domain;
pub mod fakes;
pub mod generation;
pub mod host;
pub mod metrics;
pub mod obs;
pub mod orchestrator;
pub mod presentation;
pub mod telemetry;

pub use classify::{
    default_classifier, Classification, ClassificationRule, ClassificationRuleSet, ErrorCategory,
    ErrorClassifier, GateAction, RuleSetClassifier, INVALID_CREDENTIAL_MESSAGE,
    QUOTA_EXCEEDED_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
pub use config::{LogFormat, StudioConfig};
pub use credential::{CredentialGate, CredentialState};
pub use domain::{
    ConfigError, ImageRef, Prompt, Result, SkipReason, StudioError, SubmissionId,
    SubmissionState, SubmitOutcome,
};
pub use generation::{GenerationFailure, GenerationResult, LogoGenerator};
pub use host::{
    HostCapability, HostCapabilityAdapter, HostError, HostResult, CAPABILITY_ABSENT_NOTICE,
};
pub use orchestrator::SubmissionOrchestrator;
pub use presentation::{PresentationSnapshot, PresentedError};

pub use metrics::METRICS;
pub use obs::{
    emit_capability_absent, emit_credential_probed, emit_failure_classified, emit_gate_changed,
    emit_picker_failed, emit_probe_failed, emit_submission_abandoned, emit_submission_ignored,
    emit_submission_settled, emit_submission_started, submission_span,
};
pub use telemetry::{init_tracing, init_tracing_from_config};

/// Logo Studio version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
