//! Error types for choco-adopt operations.
//!
//! This module defines [`AdoptError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `AdoptError` for failures that abort the pipeline
//! - Use `anyhow::Error` (via `AdoptError::Other`) for unexpected errors
//! - "Nothing to do" results and per-package install failures are not errors;
//!   see [`PipelineOutcome`](crate::pipeline::PipelineOutcome) and
//!   [`RegistrationOutcome`](crate::register::RegistrationOutcome)

use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when the operator interrupts the run.
pub const EXIT_INTERRUPTED: u8 = 130;

/// Core error type for choco-adopt operations.
#[derive(Debug, Error)]
pub enum AdoptError {
    /// A package manager CLI did not answer its version query.
    #[error("{tool} is not available: {hint}")]
    ToolMissing { tool: String, hint: String },

    /// An inventory stage could not produce usable data.
    #[error("{stage} failed: {message}")]
    StageFailed { stage: String, message: String },

    /// Settings file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Settings parsed but hold unusable values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The registration batch script could not be written.
    #[error("Failed to write {path}: {source}")]
    ScriptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The operator aborted the run.
    #[error("Interrupted by user")]
    Interrupted,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdoptError {
    /// Shorthand for a failed inventory stage.
    pub fn stage(stage: &str, message: impl Into<String>) -> Self {
        Self::StageFailed {
            stage: stage.to_string(),
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Interrupted => EXIT_INTERRUPTED,
            _ => 1,
        }
    }

    /// Whether this error was not anticipated by any stage.
    ///
    /// Unexpected errors are reported with their full cause chain.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Other(_))
    }
}

/// Result type alias for choco-adopt operations.
pub type Result<T> = std::result::Result<T, AdoptError>;
