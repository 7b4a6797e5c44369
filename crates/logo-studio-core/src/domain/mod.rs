//! Domain models for Logo Studio.
//!
//! Canonical definitions for the core entities:
//! - `Prompt`: the user's description of the logo they want
//! - `ImageRef`: opaque handle to a generated artifact
//! - `SubmissionState` / `SubmissionId`: one generation request's lifecycle

pub mod error;
pub mod image;
pub mod prompt;
pub mod submission;

// Re-export main types and errors
pub use error::{ConfigError, Result, StudioError};
pub use image::ImageRef;
pub use prompt::Prompt;
pub use submission::{SkipReason, SubmissionId, SubmissionState, SubmitOutcome};
