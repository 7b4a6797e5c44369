//! Credential gate: decides whether the submission flow is reachable at all.
//!
//! Transitions:
//! - `Unknown → Ready | NotReady` once, from the startup probe ([`CredentialGate::resolve`])
//! - `NotReady → Ready` via [`CredentialGate::mark_ready`] (user selected a key)
//! - `Ready → NotReady` via [`CredentialGate::mark_not_ready`] (key rejected by the service)

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::metrics::METRICS;
use crate::obs;

/// Readiness of the API credential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialState {
    /// Startup probe has not completed yet.
    #[default]
    Unknown,
    NotReady,
    Ready,
}

impl CredentialState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CredentialState::Ready)
    }
}

impl std::fmt::Display for CredentialState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialState::Unknown => write!(f, "unknown"),
            CredentialState::NotReady => write!(f, "not_ready"),
            CredentialState::Ready => write!(f, "ready"),
        }
    }
}

/// Single authoritative readiness flag for the session.
///
/// Backed by a `watch` channel so the presentation layer can follow gate
/// changes without polling.
#[derive(Debug)]
pub struct CredentialGate {
    state: watch::Sender<CredentialState>,
}

impl Default for CredentialGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialGate {
    pub fn new() -> Self {
        let (state, _) = watch::channel(CredentialState::Unknown);
        Self { state }
    }

    pub fn state(&self) -> CredentialState {
        *self.state.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Whether the startup probe (or a user confirmation) has settled the gate.
    pub fn is_resolved(&self) -> bool {
        self.state() != CredentialState::Unknown
    }

    pub fn subscribe(&self) -> watch::Receiver<CredentialState> {
        self.state.subscribe()
    }

    /// Apply the startup probe result.
    ///
    /// Only takes effect while the gate is still `Unknown`; returns whether it
    /// did. A user confirmation that lands before the probe wins.
    pub fn resolve(&self, ready: bool) -> bool {
        let to = if ready {
            CredentialState::Ready
        } else {
            CredentialState::NotReady
        };
        self.transition(to, |from| from == CredentialState::Unknown)
    }

    /// The user finished (or is assumed to have finished) the picker flow.
    /// No-op when already ready.
    pub fn mark_ready(&self) {
        self.transition(CredentialState::Ready, |from| from != CredentialState::Ready);
    }

    /// The service rejected the current credential. Only demotes a `Ready`
    /// gate.
    pub fn mark_not_ready(&self) {
        if self.transition(CredentialState::NotReady, |from| from == CredentialState::Ready) {
            METRICS.inc_gate_demotions();
        }
    }

    fn transition(
        &self,
        to: CredentialState,
        allowed: impl FnOnce(CredentialState) -> bool,
    ) -> bool {
        let mut from = to;
        let changed = self.state.send_if_modified(|state| {
            from = *state;
            if allowed(from) {
                *state = to;
                true
            } else {
                false
            }
        });
        if changed {
            obs::emit_gate_changed(from, to);
        }
        changed
    }
}
