//! Generation service boundary.
//!
//! The transport (HTTP client, SDK, model choice) lives outside this crate.
//! The orchestrator only needs "prompt in, image reference out, or a failure".

use async_trait::async_trait;

use crate::domain::ImageRef;

/// A failure raised by the generation service.
///
/// Providers raise two shapes of failure: proper error objects carrying a
/// descriptive message, and arbitrary values with no agreed structure. The
/// classifier treats them differently, so the distinction is kept here.
#[derive(Debug)]
pub enum GenerationFailure {
    /// A recognised error with a message.
    Error(anyhow::Error),
    /// A value of unknown shape.
    Opaque(serde_json::Value),
}

impl GenerationFailure {
    /// A recognised failure with the given message.
    pub fn message(message: impl Into<String>) -> Self {
        GenerationFailure::Error(anyhow::Error::msg(message.into()))
    }

    pub fn opaque(value: serde_json::Value) -> Self {
        GenerationFailure::Opaque(value)
    }

    /// The top-level message of a recognised failure.
    pub fn error_message(&self) -> Option<String> {
        match self {
            GenerationFailure::Error(err) => Some(err.to_string()),
            GenerationFailure::Opaque(_) => None,
        }
    }

    /// Every message in a recognised failure's cause chain, outermost first,
    /// joined with `": "`.
    pub fn description(&self) -> Option<String> {
        match self {
            GenerationFailure::Error(err) => Some(format!("{err:#}")),
            GenerationFailure::Opaque(_) => None,
        }
    }
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationFailure::Error(err) => write!(f, "{err:#}"),
            GenerationFailure::Opaque(value) => write!(f, "opaque failure value: {value}"),
        }
    }
}

impl From<anyhow::Error> for GenerationFailure {
    fn from(err: anyhow::Error) -> Self {
        GenerationFailure::Error(err)
    }
}

/// Result type for generation calls.
pub type GenerationResult<T> = std::result::Result<T, GenerationFailure>;

/// The remote generative-AI service.
///
/// One call per submission; no streaming, no cancellation token.
#[async_trait]
pub trait LogoGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> GenerationResult<ImageRef>;
}
