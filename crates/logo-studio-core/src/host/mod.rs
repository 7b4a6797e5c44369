//! Host capability: the credential-selection service provided by the
//! embedding environment.
//!
//! The capability is injected as an `Option<Arc<dyn HostCapability>>`.
//! `None` is a normal deployment (credentials supplied out of band), not an
//! error.
//!
//! # Modules
//!
//! - [`capability`]: `HostCapability` port + `HostError`
//! - [`adapter`]: `HostCapabilityAdapter` (probe, picker)

pub mod adapter;
pub mod capability;

pub use adapter::HostCapabilityAdapter;
pub use capability::{HostCapability, HostError, HostResult, CAPABILITY_ABSENT_NOTICE};
