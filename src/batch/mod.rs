pub mod dispatcher;
pub mod poller;
pub mod summary;

use std::time::Duration;

use serde::Serialize;

pub use dispatcher::run_batched;
pub use poller::{await_active, Activatable};
pub use summary::{summarize, BatchSummary, ItemDetail};

/// Settled result of one work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    Fulfilled(R),
    /// Carries the failure's message text.
    Rejected(String),
}

impl<R> Outcome<R> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled(_))
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            Outcome::Fulfilled(_) => OutcomeStatus::Fulfilled,
            Outcome::Rejected(_) => OutcomeStatus::Rejected,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Fulfilled(_) => None,
            Outcome::Rejected(message) => Some(message.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Fulfilled,
    Rejected,
}

/// Chunking and pacing for the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Items per chunk. 0 puts everything in a single chunk.
    pub batch_size: usize,
    /// Pause between consecutive chunks.
    pub delay: Duration,
}

impl BatchPolicy {
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self { batch_size, delay }
    }

    /// Every item in one chunk, no pacing.
    pub fn unbounded() -> Self {
        Self {
            batch_size: 0,
            delay: Duration::ZERO,
        }
    }
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self::new(10, Duration::from_millis(1000))
    }
}

/// How long to wait for a resource to become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` polls forever.
    pub max_attempts: Option<u32>,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: Option<u32>) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Some(300))
    }
}
