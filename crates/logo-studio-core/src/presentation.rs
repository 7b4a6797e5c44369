//! Read-only view of session state for the rendering layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{Classification, ErrorCategory};
use crate::credential::CredentialState;
use crate::domain::{ImageRef, SubmissionId, SubmissionState};

/// The error currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentedError {
    pub category: ErrorCategory,
    pub message: String,
}

impl From<&Classification> for PresentedError {
    fn from(c: &Classification) -> Self {
        Self {
            category: c.category,
            message: c.message.clone(),
        }
    }
}

/// Everything the UI renders, published as one value per change.
///
/// `image` and `error` are never both present, and both are cleared while a
/// submission is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationSnapshot {
    /// Prompt text as typed, untrimmed.
    pub prompt: String,
    pub image: Option<ImageRef>,
    pub error: Option<PresentedError>,
    pub submission: SubmissionState,
    pub submission_id: Option<SubmissionId>,
    pub started_at: Option<DateTime<Utc>>,
    pub settled_at: Option<DateTime<Utc>>,
    pub credential: CredentialState,
}

impl PresentationSnapshot {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.submission.is_in_flight()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Whether the main submission UI should be shown instead of the key
    /// selection screen.
    pub fn shows_generator(&self) -> bool {
        self.credential.is_ready()
    }
}
