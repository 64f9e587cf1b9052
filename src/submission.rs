//! Hand-off point for completed registrations.
//!
//! The summary step's final action calls a [`RegistrationSubmitter`]. The
//! only built-in implementation records the registration in the log; there is
//! no backend behind it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::registration::RegistrationDraft;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("registration rejected: {0}")]
    Rejected(String),

    #[error("registration service unavailable: {0}")]
    Unavailable(String),
}

impl SubmitError {
    /// Whether trying again with the same draft can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Unavailable(_))
    }
}

/// Acknowledgement for an accepted registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
pub trait RegistrationSubmitter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Deliver a validated draft
    async fn submit(&self, draft: &RegistrationDraft) -> Result<SubmissionReceipt, SubmitError>;
}

/// Records the submitted values in the log and accepts them.
///
/// Passwords never reach the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSubmitter;

#[async_trait]
impl RegistrationSubmitter for LogSubmitter {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn submit(&self, draft: &RegistrationDraft) -> Result<SubmissionReceipt, SubmitError> {
        let receipt = SubmissionReceipt::new();
        tracing::info!(
            id = %receipt.id,
            first_name = %draft.first_name,
            last_name = %draft.last_name,
            email = %draft.email,
            "Registration submitted"
        );
        Ok(receipt)
    }
}
