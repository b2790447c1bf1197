//! Trait abstraction for the submission transport to enable mocking in tests

use anyhow::Result;
use async_trait::async_trait;

use super::{SubmissionRequest, SubmissionResult};

/// The external channel a submission payload is handed to
///
/// An `Err` means the channel itself broke (connection refused, timeout); a
/// rejected-but-delivered submission is `Ok(SubmissionResult::Failure)`. The
/// pipeline treats both as a failed attempt and preserves the form's values.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one submission and await the outcome
    async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionResult>;
}
