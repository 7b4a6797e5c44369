//! Submission orchestrator: owns the session's credential gate and the
//! request lifecycle, and publishes presentation snapshots.
//!
//! Lifecycle of one submission:
//! 1. Preconditions (non-empty prompt, gate ready, nothing in flight) are
//!    checked; a failed check is a silent no-op.
//! 2. The snapshot moves to `InFlight` with image and error cleared, in the
//!    same update, so a loading state never shows a stale result.
//! 3. Exactly one generator call is made. Success stores the image; failure is
//!    classified, stored, and its gate action applied.
//! 4. An RAII guard clears the in-flight state if the submission future is
//!    dropped or unwinds before settling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::watch;
use tracing::Instrument;

use crate::classify::{
    default_classifier, Classification, ErrorCategory, ErrorClassifier, GateAction,
    UNKNOWN_ERROR_MESSAGE,
};
use crate::config::StudioConfig;
use crate::credential::{CredentialGate, CredentialState};
use crate::domain::{
    ImageRef, Prompt, Result, SkipReason, SubmissionId, SubmissionState, SubmitOutcome,
};
use crate::generation::{GenerationFailure, GenerationResult, LogoGenerator};
use crate::host::{HostCapability, HostCapabilityAdapter, HostResult};
use crate::metrics::METRICS;
use crate::obs;
use crate::presentation::{PresentationSnapshot, PresentedError};

/// Drives credential readiness and logo submissions for one session.
///
/// Share it behind an `Arc` to spawn submissions as background tasks.
pub struct SubmissionOrchestrator {
    host: HostCapabilityAdapter,
    generator: Arc<dyn LogoGenerator>,
    classifier: Arc<dyn ErrorClassifier>,
    gate: CredentialGate,
    view: watch::Sender<PresentationSnapshot>,
    generation_timeout: Option<Duration>,
}

impl SubmissionOrchestrator {
    /// Create an orchestrator with the default classifier and no timeout.
    ///
    /// `host` is `None` when the environment has no credential-selection
    /// capability.
    pub fn new(host: Option<Arc<dyn HostCapability>>, generator: Arc<dyn LogoGenerator>) -> Self {
        let (view, _) = watch::channel(PresentationSnapshot::default());
        Self {
            host: HostCapabilityAdapter::new(host),
            generator,
            classifier: Arc::new(default_classifier()),
            gate: CredentialGate::new(),
            view,
            generation_timeout: None,
        }
    }

    /// Create an orchestrator configured from `LOGO_STUDIO_*` environment
    /// variables.
    pub fn from_env(
        host: Option<Arc<dyn HostCapability>>,
        generator: Arc<dyn LogoGenerator>,
    ) -> Result<Self> {
        let config = StudioConfig::from_env()?;
        Ok(Self::new(host, generator).with_config(&config))
    }

    /// Swap in a different failure classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn ErrorClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Apply session settings from a loaded config.
    pub fn with_config(mut self, config: &StudioConfig) -> Self {
        self.host = self
            .host
            .with_assume_ready_without_host(config.assume_ready_without_host);
        self.generation_timeout = config.generation_timeout;
        self
    }

    pub fn classifier_version(&self) -> &str {
        self.classifier.version()
    }

    // -----------------------------------------------------------------------
    // Credential flow
    // -----------------------------------------------------------------------

    /// Run the startup credential probe.
    ///
    /// The gate is resolved at most once; later calls return the current
    /// state without probing again.
    pub async fn initialize(&self) -> CredentialState {
        if !self.gate.is_resolved() {
            let ready = self.host.probe_credential().await;
            self.gate.resolve(ready);
            self.sync_credential();
        }
        self.gate.state()
    }

    pub fn credential_state(&self) -> CredentialState {
        self.gate.state()
    }

    pub fn is_credential_ready(&self) -> bool {
        self.gate.is_ready()
    }

    pub fn subscribe_credential(&self) -> watch::Receiver<CredentialState> {
        self.gate.subscribe()
    }

    /// The user finished the key picker. The host gives no machine-checkable
    /// confirmation, so readiness is assumed; a later invalid-key failure
    /// demotes the gate again.
    pub fn on_credential_confirmed(&self) {
        self.gate.mark_ready();
        self.sync_credential();
    }

    /// Open the host's key picker, then confirm optimistically.
    ///
    /// Reachable in any gate state. On [`HostError::CapabilityAbsent`] the
    /// caller should show [`HostError::notice`] as an alert; the gate is left
    /// untouched.
    ///
    /// [`HostError::CapabilityAbsent`]: crate::host::HostError::CapabilityAbsent
    /// [`HostError::notice`]: crate::host::HostError::notice
    pub async fn select_credential(&self) -> HostResult<()> {
        match self.host.open_credential_picker().await {
            Ok(()) => {
                self.on_credential_confirmed();
                Ok(())
            }
            Err(e) => {
                obs::emit_picker_failed(&e);
                Err(e)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Presentation
    // -----------------------------------------------------------------------

    pub fn subscribe(&self) -> watch::Receiver<PresentationSnapshot> {
        self.view.subscribe()
    }

    pub fn snapshot(&self) -> PresentationSnapshot {
        self.view.borrow().clone()
    }

    /// Update the prompt input slot (what the user has typed so far).
    pub fn set_prompt(&self, text: impl Into<String>) {
        let text = text.into();
        self.view.send_if_modified(|s| {
            if s.prompt == text {
                false
            } else {
                s.prompt = text;
                true
            }
        });
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Submit whatever is currently in the prompt slot.
    pub async fn submit_current(&self) -> SubmitOutcome {
        let prompt = self.view.borrow().prompt.clone();
        self.submit(&prompt).await
    }

    /// Generate a logo for `prompt_text`.
    ///
    /// Never fails: precondition violations return
    /// [`SubmitOutcome::Ignored`] and generation failures are classified into
    /// the snapshot. Callers may drop the returned outcome.
    pub async fn submit(&self, prompt_text: &str) -> SubmitOutcome {
        let Some(prompt) = Prompt::parse(prompt_text) else {
            return ignored(SkipReason::EmptyPrompt);
        };
        if !self.gate.is_ready() {
            return ignored(SkipReason::CredentialNotReady);
        }

        let id = SubmissionId::new();
        let accepted = self.view.send_if_modified(|s| {
            if s.submission.is_in_flight() {
                return false;
            }
            s.submission = SubmissionState::InFlight;
            s.submission_id = Some(id);
            s.image = None;
            s.error = None;
            s.started_at = Some(Utc::now());
            s.settled_at = None;
            true
        });
        if !accepted {
            return ignored(SkipReason::InFlight);
        }

        let _guard = InFlightGuard {
            view: &self.view,
            id,
        };
        METRICS.inc_started();
        let span = obs::submission_span(id);
        span.in_scope(|| obs::emit_submission_started(id, prompt.as_str().chars().count()));
        self.run(id, prompt).instrument(span).await
    }

    async fn run(&self, id: SubmissionId, prompt: Prompt) -> SubmitOutcome {
        let started = Instant::now();
        let result = self.call_generator(&prompt).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(image) => {
                self.settle(id, SubmissionState::Succeeded, |s| {
                    s.image = Some(image.clone());
                });
                METRICS.inc_succeeded();
                obs::emit_submission_settled(id, SubmissionState::Succeeded, duration_ms);
                SubmitOutcome::Succeeded(image)
            }
            Err(failure) => {
                let classification = self.classifier.classify(&failure);
                obs::emit_failure_classified(self.classifier.version(), &classification);
                if classification.gate_action == GateAction::MarkNotReady {
                    self.gate.mark_not_ready();
                }
                let credential = self.gate.state();
                self.settle(id, SubmissionState::Failed, |s| {
                    s.error = Some(PresentedError::from(&classification));
                    s.credential = credential;
                });
                METRICS.inc_failed();
                obs::emit_submission_settled(id, SubmissionState::Failed, duration_ms);
                SubmitOutcome::Failed(classification)
            }
        }
    }

    async fn call_generator(&self, prompt: &Prompt) -> GenerationResult<ImageRef> {
        let call = self.generator.generate(prompt.as_str());
        let Some(limit) = self.generation_timeout else {
            return call.await;
        };
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_elapsed) => Err(GenerationFailure::message(format!(
                "Logo generation timed out after {}s",
                limit.as_secs()
            ))),
        }
    }

    fn settle(
        &self,
        id: SubmissionId,
        state: SubmissionState,
        apply: impl FnOnce(&mut PresentationSnapshot),
    ) {
        self.view.send_modify(|s| {
            if s.submission_id != Some(id) {
                return;
            }
            apply(s);
            s.submission = state;
            s.settled_at = Some(Utc::now());
        });
    }

    fn sync_credential(&self) {
        let state = self.gate.state();
        self.view.send_if_modified(|s| {
            if s.credential == state {
                false
            } else {
                s.credential = state;
                true
            }
        });
    }
}

impl std::fmt::Debug for SubmissionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionOrchestrator")
            .field("host", &self.host)
            .field("classifier", &self.classifier.version())
            .field("credential", &self.gate.state())
            .field("submission", &self.view.borrow().submission)
            .field("generation_timeout", &self.generation_timeout)
            .finish()
    }
}

fn ignored(reason: SkipReason) -> SubmitOutcome {
    METRICS.inc_ignored();
    obs::emit_submission_ignored(reason);
    SubmitOutcome::Ignored(reason)
}

/// Clears the in-flight state of submission `id` if it is still set when the
/// submission scope ends.
struct InFlightGuard<'a> {
    view: &'a watch::Sender<PresentationSnapshot>,
    id: SubmissionId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let id = self.id;
        let abandoned = self.view.send_if_modified(|s| {
            if s.submission_id != Some(id) || !s.submission.is_in_flight() {
                return false;
            }
            s.submission = SubmissionState::Failed;
            s.error = Some(PresentedError::from(&Classification::new(
                ErrorCategory::Unknown,
                UNKNOWN_ERROR_MESSAGE,
            )));
            s.settled_at = Some(Utc::now());
            true
        });
        if abandoned {
            obs::emit_submission_abandoned(id);
        }
    }
}
