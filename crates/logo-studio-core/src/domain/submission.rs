//! Submission lifecycle types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::image::ImageRef;
use crate::classify::Classification;

/// Lifecycle of the current generation request.
///
/// Only one submission is live at a time; a new submit replaces the settled
/// one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed)
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::InFlight => write!(f, "in_flight"),
            SubmissionState::Succeeded => write!(f, "succeeded"),
            SubmissionState::Failed => write!(f, "failed"),
        }
    }
}

/// Identifier attached to a submission's tracing span and snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a `submit` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Prompt was empty after trimming.
    EmptyPrompt,
    /// Another submission has not settled yet.
    InFlight,
    /// The credential gate is not ready (or not yet resolved).
    CredentialNotReady,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyPrompt => write!(f, "empty_prompt"),
            SkipReason::InFlight => write!(f, "in_flight"),
            SkipReason::CredentialNotReady => write!(f, "credential_not_ready"),
        }
    }
}

/// What a `submit` call ended up doing.
///
/// Callers that treat submit as fire-and-forget can ignore this; the same
/// information reaches the presentation snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Ignored(SkipReason),
    Succeeded(ImageRef),
    Failed(Classification),
}

impl SubmitOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, SubmitOutcome::Ignored(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(SubmissionState::InFlight.is_in_flight());
        assert!(!SubmissionState::Idle.is_settled());
        assert!(SubmissionState::Succeeded.is_settled());
        assert!(SubmissionState::Failed.is_settled());
        assert_eq!(SubmissionState::default(), SubmissionState::Idle);
    }

    #[test]
    fn test_submission_ids_are_unique() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::EmptyPrompt.to_string(), "empty_prompt");
        assert_eq!(SkipReason::InFlight.to_string(), "in_flight");
        assert_eq!(
            SkipReason::CredentialNotReady.to_string(),
            "credential_not_ready"
        );
    }
}
