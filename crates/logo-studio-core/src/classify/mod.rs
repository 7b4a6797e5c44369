//! Error classification: turns generation failures into user-actionable
//! messages.
//!
//! Provider error text is the only classification signal that crosses the
//! service boundary, so the matching rules sit behind [`ErrorClassifier`] and
//! carry an explicit version. Updating them never touches the orchestrator.
//!
//! # Modules
//!
//! - [`rules`]: `ClassificationRule`, `ClassificationRuleSet::provider_text_v1()`,
//!   `RuleSetClassifier` (first-match-wins)

pub mod rules;

use serde::{Deserialize, Serialize};

use crate::generation::GenerationFailure;

pub use rules::{ClassificationRule, ClassificationRuleSet, RuleSetClassifier};

pub const QUOTA_EXCEEDED_MESSAGE: &str = "API key quota exceeded. Please select a different key via the key icon in the top right, or check your billing details.";
pub const INVALID_CREDENTIAL_MESSAGE: &str =
    "The selected API key is not valid. Please select a new one.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// User-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    QuotaExceeded,
    InvalidCredential,
    Generic,
    Unknown,
    /// Picker requested on a host without the capability. Raised by the host
    /// adapter, never by a classifier.
    CapabilityAbsent,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::QuotaExceeded => write!(f, "quota_exceeded"),
            ErrorCategory::InvalidCredential => write!(f, "invalid_credential"),
            ErrorCategory::Generic => write!(f, "generic"),
            ErrorCategory::Unknown => write!(f, "unknown"),
            ErrorCategory::CapabilityAbsent => write!(f, "capability_absent"),
        }
    }
}

/// What the caller must do to the credential gate after a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateAction {
    #[default]
    None,
    MarkNotReady,
}

/// The classifier's verdict on one failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: ErrorCategory,
    /// Message to show the user, verbatim.
    pub message: String,
    pub gate_action: GateAction,
}

impl Classification {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            gate_action: GateAction::None,
        }
    }

    pub fn with_gate_action(mut self, gate_action: GateAction) -> Self {
        self.gate_action = gate_action;
        self
    }
}

/// Maps a generation failure to a [`Classification`].
///
/// Implementations must be pure and deterministic; the caller applies the
/// gate action.
pub trait ErrorClassifier: Send + Sync {
    /// Identifier of the rule set in use, e.g. `provider-text/v1`.
    fn version(&self) -> &str;

    fn classify(&self, failure: &GenerationFailure) -> Classification;
}

/// The default classifier, backed by [`ClassificationRuleSet::provider_text_v1`].
pub fn default_classifier() -> RuleSetClassifier {
    RuleSetClassifier::new(ClassificationRuleSet::provider_text_v1())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::QuotaExceeded.to_string(), "quota_exceeded");
        assert_eq!(ErrorCategory::CapabilityAbsent.to_string(), "capability_absent");
    }

    #[test]
    fn test_classification_serializes_snake_case() {
        let c = Classification::new(ErrorCategory::InvalidCredential, "bad key")
            .with_gate_action(GateAction::MarkNotReady);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["category"], "invalid_credential");
        assert_eq!(json["gate_action"], "mark_not_ready");
    }
}
