//! Pipeline events and event bus
//!
//! The batch driver publishes one event per tweet outcome plus start/finish
//! markers. Failures are observable here independently of the log stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Batch pipeline events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PipelineEvent {
    /// Batch accepted, no tweet processed yet
    BatchStarted {
        run_id: Uuid,
        total: usize,
        timestamp: DateTime<Utc>,
    },

    /// Tweet scored and written to the output sink
    TweetScored {
        run_id: Uuid,
        /// Position in the input file (0-based)
        index: usize,
        aggregate: f64,
        timestamp: DateTime<Utc>,
    },

    /// Tweet pipeline failed; nothing was emitted for it
    TweetFailed {
        run_id: Uuid,
        index: usize,
        /// Remote operation that failed, if the failure came from the service
        operation: Option<String>,
        error: String,
        timestamp: DateTime<Utc>,
    },

    /// Every tweet has either been scored or failed
    BatchCompleted {
        run_id: Uuid,
        succeeded: usize,
        failed: usize,
        timestamp: DateTime<Utc>,
    },
}

impl PipelineEvent {
    /// Batch this event belongs to
    pub fn run_id(&self) -> Uuid {
        match self {
            PipelineEvent::BatchStarted { run_id, .. }
            | PipelineEvent::TweetScored { run_id, .. }
            | PipelineEvent::TweetFailed { run_id, .. }
            | PipelineEvent::BatchCompleted { run_id, .. } => *run_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            PipelineEvent::BatchStarted { timestamp, .. }
            | PipelineEvent::TweetScored { timestamp, .. }
            | PipelineEvent::TweetFailed { timestamp, .. }
            | PipelineEvent::BatchCompleted { timestamp, .. } => *timestamp,
        }
    }
}

/// Broadcast bus for pipeline events
///
/// Wraps `tokio::sync::broadcast`. Slow subscribers lose the oldest events once
/// `capacity` is exceeded; publishers never block.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PipelineEvent>,
    capacity: usize,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: PipelineEvent,
    ) -> Result<usize, broadcast::error::SendError<PipelineEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring the case of no subscribers
    pub fn emit_lossy(&self, event: PipelineEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
