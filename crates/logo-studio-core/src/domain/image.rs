//! Opaque references to generated artifacts.

use serde::{Deserialize, Serialize};

/// Handle to a generated logo, usually a URL or data URI.
///
/// The core never interprets the contents; rendering is the presentation
/// layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}
