//! The host-side port for credential selection.

use async_trait::async_trait;

/// Notice shown to the user when the picker is requested on a host that has
/// no credential-selection capability.
pub const CAPABILITY_ABSENT_NOTICE: &str = "This feature requires the AI Studio environment.";

/// Errors produced by the host capability layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("no credential-selection capability is available on this host")]
    CapabilityAbsent,

    #[error("host capability call failed: {0}")]
    Capability(String),
}

impl HostError {
    /// User-facing text for an alert-level notice.
    pub fn notice(&self) -> &str {
        match self {
            HostError::CapabilityAbsent => CAPABILITY_ABSENT_NOTICE,
            HostError::Capability(reason) => reason,
        }
    }
}

/// Result type for host capability operations.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Credential-selection service provided by the embedding host.
#[async_trait]
pub trait HostCapability: Send + Sync {
    /// Whether the user has already selected a usable API key.
    async fn has_selected_api_key(&self) -> HostResult<bool>;

    /// Open the host's interactive key picker.
    ///
    /// Resolves when the picker closes. It carries no signal about whether
    /// a key was actually chosen.
    async fn open_select_key(&self) -> HostResult<()>;
}
