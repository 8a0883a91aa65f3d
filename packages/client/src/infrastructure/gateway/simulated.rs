//! Stand-ins for services the backend does not offer yet.
//!
//! Code execution and submission are simulated with a fixed delay; the
//! terminal front-end has no fullscreen mode.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    CodeRunner, GatewayError, ParticipantId, Presentation, PresentationError, RoomId,
    SolutionSubmitter, SubmitKind,
};

/// Delay of the simulated run and submit calls
pub const SIMULATED_LATENCY: Duration = Duration::from_secs(2);

/// Output of every sample run
pub const SAMPLE_RUN_OUTPUT: &str = "Running test cases...

Test Case 1: \u{2713} PASSED
Input: nums = [2,7,11,15], target = 9
Expected: [0,1]
Your output: [0,1]

Test Case 2: \u{2713} PASSED
Input: nums = [3,2,4], target = 6
Expected: [1,2]
Your output: [1,2]

All test cases passed!";

/// Returns [`SAMPLE_RUN_OUTPUT`] after a delay, whatever the source
pub struct SampleCodeRunner {
    delay: Duration,
}

impl SampleCodeRunner {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SampleCodeRunner {
    fn default() -> Self {
        Self::new(SIMULATED_LATENCY)
    }
}

#[async_trait]
impl CodeRunner for SampleCodeRunner {
    async fn run(&self, source: &str) -> Result<String, GatewayError> {
        tracing::debug!("Running {} byte(s) of code against sample cases", source.len());
        tokio::time::sleep(self.delay).await;
        Ok(SAMPLE_RUN_OUTPUT.to_string())
    }
}

/// Accepts every submission after a delay
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(SIMULATED_LATENCY)
    }
}

#[async_trait]
impl SolutionSubmitter for SimulatedSubmitter {
    async fn submit(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
        source: &str,
        kind: SubmitKind,
    ) -> Result<(), GatewayError> {
        tracing::info!(
            "Submitting solution: room={} participant={} kind={:?} size={}",
            room_id,
            participant_id,
            kind,
            source.len()
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Terminals cannot go fullscreen
pub struct TerminalPresentation;

impl Presentation for TerminalPresentation {
    fn request_fullscreen(&self) -> Result<(), PresentationError> {
        Err(PresentationError::Unsupported)
    }
}
