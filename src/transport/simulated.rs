//! Simulated transport for demos and integration tests
//!
//! Stands in for a real submission backend: waits a configurable latency,
//! then resolves to a scripted outcome.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

use super::{SubmissionRequest, SubmissionResult, Transport};

/// What the simulated transport resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedOutcome {
    /// Accept every submission with this message
    Accept(String),
    /// Reject every submission with this message
    Reject(String),
    /// Fail the channel itself, as if the backend were unreachable
    ChannelError,
}

/// A stand-in transport with configurable latency and scripted outcome
pub struct SimulatedTransport {
    latency: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedTransport {
    pub fn new(latency: Duration, outcome: SimulatedOutcome) -> Self {
        Self { latency, outcome }
    }

    /// An instant transport that accepts everything
    pub fn accepting() -> Self {
        Self::new(
            Duration::ZERO,
            SimulatedOutcome::Accept("Submission received".to_string()),
        )
    }

    /// An instant transport that rejects everything
    pub fn rejecting(message: &str) -> Self {
        Self::new(Duration::ZERO, SimulatedOutcome::Reject(message.to_string()))
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionResult> {
        tracing::debug!(form_type = %request.form_type, "simulated transport received submission");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match &self.outcome {
            SimulatedOutcome::Accept(message) => Ok(SubmissionResult::Success {
                message: message.clone(),
            }),
            SimulatedOutcome::Reject(message) => Ok(SubmissionResult::Failure {
                message: message.clone(),
            }),
            SimulatedOutcome::ChannelError => Err(anyhow!("simulated transport unreachable")),
        }
    }
}
