//! Versioned substring rules over provider error text.

use serde::{Deserialize, Serialize};

use super::{
    Classification, ErrorCategory, ErrorClassifier, GateAction, INVALID_CREDENTIAL_MESSAGE,
    QUOTA_EXCEEDED_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
use crate::generation::GenerationFailure;

/// A single rule: if the failure text contains `needle`, classify it as
/// `category` with `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub needle: String,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(default)]
    pub gate_action: GateAction,
}

impl ClassificationRule {
    pub fn new(needle: &str, category: ErrorCategory, message: &str) -> Self {
        Self {
            needle: needle.to_string(),
            category,
            message: message.to_string(),
            gate_action: GateAction::None,
        }
    }

    pub fn with_gate_action(mut self, gate_action: GateAction) -> Self {
        self.gate_action = gate_action;
        self
    }

    pub fn matches(&self, text: &str) -> bool {
        text.contains(&self.needle)
    }

    pub fn classification(&self) -> Classification {
        Classification::new(self.category, self.message.clone()).with_gate_action(self.gate_action)
    }
}

/// An ordered, versioned list of rules. Order matters: provider messages are
/// not mutually exclusive, so the most actionable rule goes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRuleSet {
    pub version: String,
    pub rules: Vec<ClassificationRule>,
}

impl ClassificationRuleSet {
    pub fn empty(version: &str) -> Self {
        Self {
            version: version.to_string(),
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: ClassificationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules for the image generation provider's error text.
    pub fn provider_text_v1() -> Self {
        Self::empty("provider-text/v1")
            .with_rule(ClassificationRule::new(
                "RESOURCE_EXHAUSTED",
                ErrorCategory::QuotaExceeded,
                QUOTA_EXCEEDED_MESSAGE,
            ))
            .with_rule(
                ClassificationRule::new(
                    "Requested entity was not found",
                    ErrorCategory::InvalidCredential,
                    INVALID_CREDENTIAL_MESSAGE,
                )
                .with_gate_action(GateAction::MarkNotReady),
            )
    }
}

/// First-match-wins classifier over a [`ClassificationRuleSet`].
///
/// Fallbacks after the rules: a recognised failure keeps its own message
/// (`Generic`); anything else is `Unknown`. Opaque values are never matched
/// against the rules.
#[derive(Debug, Clone)]
pub struct RuleSetClassifier {
    rule_set: ClassificationRuleSet,
}

impl RuleSetClassifier {
    pub fn new(rule_set: ClassificationRuleSet) -> Self {
        Self { rule_set }
    }

    pub fn rule_set(&self) -> &ClassificationRuleSet {
        &self.rule_set
    }
}

impl ErrorClassifier for RuleSetClassifier {
    fn version(&self) -> &str {
        &self.rule_set.version
    }

    fn classify(&self, failure: &GenerationFailure) -> Classification {
        let (Some(text), Some(message)) = (failure.description(), failure.error_message()) else {
            return Classification::new(ErrorCategory::Unknown, UNKNOWN_ERROR_MESSAGE);
        };

        for rule in &self.rule_set.rules {
            if rule.matches(&text) {
                return rule.classification();
            }
        }

        Classification::new(ErrorCategory::Generic, message)
    }
}
