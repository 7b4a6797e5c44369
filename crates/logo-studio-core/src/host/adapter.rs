//! Adapter over the optional host capability.

use std::sync::Arc;

use crate::obs;

use super::capability::{HostCapability, HostError, HostResult};

/// Wraps the optional [`HostCapability`] with the startup-probe and picker
/// policies.
#[derive(Clone)]
pub struct HostCapabilityAdapter {
    host: Option<Arc<dyn HostCapability>>,
    assume_ready_without_host: bool,
}

impl HostCapabilityAdapter {
    pub fn new(host: Option<Arc<dyn HostCapability>>) -> Self {
        Self {
            host,
            assume_ready_without_host: true,
        }
    }

    /// Adapter for a host with no credential-selection capability.
    pub fn absent() -> Self {
        Self::new(None)
    }

    /// What the probe reports when no capability is present.
    pub fn with_assume_ready_without_host(mut self, assume_ready: bool) -> Self {
        self.assume_ready_without_host = assume_ready;
        self
    }

    pub fn is_present(&self) -> bool {
        self.host.is_some()
    }

    /// Ask the host whether a credential is already selected.
    ///
    /// Never fails. Without a capability the environment is assumed to
    /// supply credentials itself; a failing probe counts as "no key".
    pub async fn probe_credential(&self) -> bool {
        let Some(host) = &self.host else {
            obs::emit_capability_absent(self.assume_ready_without_host);
            return self.assume_ready_without_host;
        };

        match host.has_selected_api_key().await {
            Ok(has_key) => {
                obs::emit_credential_probed(has_key);
                has_key
            }
            Err(e) => {
                obs::emit_probe_failed(&e);
                false
            }
        }
    }

    /// Open the host's key picker.
    ///
    /// Returns as soon as the host call resolves; the caller proceeds
    /// optimistically. [`HostError::CapabilityAbsent`] is terminal for this
    /// action and should be shown to the user as a notice.
    pub async fn open_credential_picker(&self) -> HostResult<()> {
        let host = self.host.as_ref().ok_or(HostError::CapabilityAbsent)?;
        host.open_select_key().await
    }
}

impl std::fmt::Debug for HostCapabilityAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCapabilityAdapter")
            .field("host_present", &self.is_present())
            .field("assume_ready_without_host", &self.assume_ready_without_host)
            .finish()
    }
}
