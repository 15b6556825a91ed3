//! Error types for the sample collection board
//!
//! Provides error handling for:
//! - Unknown request and specialist references
//! - Illegal lifecycle transitions
//! - Intake validation at the input boundary
//! - Configuration loading
//! - Advisory collaborator failures (never surfaced to users)

use crate::types::{RequestId, RequestStatus, SpecialistId};

/// Main board error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// No request with this ID
    #[error("request not found: {0}")]
    RequestNotFound(RequestId),

    /// No specialist with this ID in the roster
    #[error("specialist not found: {0}")]
    SpecialistNotFound(SpecialistId),

    /// Lifecycle rule violated
    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),
}

impl BoardError {
    /// Check if error is an unknown-reference error
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RequestNotFound(_) | Self::SpecialistNotFound(_)
        )
    }

    /// Check if error is an illegal transition
    #[inline]
    #[must_use]
    pub fn is_illegal_transition(&self) -> bool {
        matches!(self, Self::Lifecycle(LifecycleError::IllegalTransition { .. }))
    }
}

/// Request state machine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// Transition not present in the lifecycle table
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    /// Target status needs an attached specialist
    #[error("status {0} requires an assigned specialist")]
    MissingSpecialist(RequestStatus),
}

/// Intake form errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// Required field empty or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Roster lists the same specialist twice
    #[error("duplicate specialist id in roster: {0}")]
    DuplicateSpecialist(SpecialistId),
}

/// Advisory collaborator errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisoryError {
    /// Collaborator could not produce advice
    #[error("advisory unavailable: {0}")]
    Unavailable(String),

    /// Collaborator answered with no text
    #[error("advisory returned empty text")]
    Empty,
}
