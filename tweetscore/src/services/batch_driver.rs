//! Batch driver
//!
//! Runs every tweet through entity sentiment → document sentiment → combine and
//! hands the result to an output sink.
//!
//! # Architecture
//! - Up to `max_in_flight` tweet pipelines run concurrently on the current task
//!   (`buffer_unordered` / `buffered`)
//! - Within one tweet the two service calls are sequential
//! - A failed tweet is logged and published as `TweetFailed`; the batch continues
//! - Only a failing output sink aborts the batch

use chrono::Utc;
use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};
use tweetscore_common::{EventBus, PipelineEvent};
use uuid::Uuid;

use crate::error::SentimentError;
use crate::models::{AggregateResult, TweetRecord};
use crate::services::aggregator::combine;
use crate::services::output_sink::OutputSink;
use crate::services::SentimentService;

pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Order in which results reach the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputOrder {
    /// As each tweet finishes
    #[default]
    Completion,
    /// Input file order; a slow tweet holds back later results
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Maximum tweet pipelines awaiting the service at once (at least 1)
    pub max_in_flight: usize,
    pub order: OutputOrder,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            order: OutputOrder::default(),
        }
    }
}

/// Outcome counts for one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub run_id: Uuid,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.succeeded == self.total
    }
}

type TweetOutcome = (usize, TweetRecord, Result<AggregateResult, SentimentError>);

/// Score one tweet: entity sentiment, then document sentiment, then combine
pub async fn score_tweet<S>(service: &S, tweet: &TweetRecord) -> Result<AggregateResult, SentimentError>
where
    S: SentimentService + ?Sized,
{
    let entity = service.fetch_entity_sentiment(&tweet.text).await?;
    let document = service.fetch_document_sentiment(&tweet.text).await?;
    combine(&tweet.text, &entity, &document)
}

pub struct BatchDriver<S: SentimentService> {
    service: Arc<S>,
    config: BatchConfig,
    event_bus: EventBus,
}

impl<S: SentimentService> BatchDriver<S> {
    pub fn new(service: Arc<S>, config: BatchConfig, event_bus: EventBus) -> Self {
        Self {
            service,
            config,
            event_bus,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Process every tweet and write each success to `sink`
    ///
    /// Per-tweet failures are counted, never returned. The only error is an I/O
    /// failure from the sink, which stops the batch.
    pub async fn run<O>(&self, tweets: Vec<TweetRecord>, sink: &mut O) -> std::io::Result<BatchSummary>
    where
        O: OutputSink + ?Sized,
    {
        let run_id = Uuid::new_v4();
        let total = tweets.len();
        let limit = self.config.max_in_flight.max(1);

        info!(
            run_id = %run_id,
            total,
            max_in_flight = limit,
            order = ?self.config.order,
            "Batch started"
        );
        self.event_bus.emit_lossy(PipelineEvent::BatchStarted {
            run_id,
            total,
            timestamp: Utc::now(),
        });

        let service = self.service.as_ref();
        let pipelines = stream::iter(tweets.into_iter().enumerate()).map(move |(index, tweet)| async move {
            debug!(run_id = %run_id, tweet_index = index, "Tweet pipeline starting");
            let outcome = score_tweet(service, &tweet).await;
            (index, tweet, outcome)
        });

        let mut summary = BatchSummary {
            run_id,
            total,
            succeeded: 0,
            failed: 0,
        };

        match self.config.order {
            OutputOrder::Completion => {
                self.drain(pipelines.buffer_unordered(limit), sink, &mut summary)
                    .await?
            }
            OutputOrder::Input => self.drain(pipelines.buffered(limit), sink, &mut summary).await?,
        }

        info!(
            run_id = %run_id,
            total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch completed"
        );
        self.event_bus.emit_lossy(PipelineEvent::BatchCompleted {
            run_id,
            succeeded: summary.succeeded,
            failed: summary.failed,
            timestamp: Utc::now(),
        });

        Ok(summary)
    }

    async fn drain<St, O>(
        &self,
        outcomes: St,
        sink: &mut O,
        summary: &mut BatchSummary,
    ) -> std::io::Result<()>
    where
        St: Stream<Item = TweetOutcome>,
        O: OutputSink + ?Sized,
    {
        let run_id = summary.run_id;
        let mut outcomes = std::pin::pin!(outcomes);

        while let Some((index, tweet, outcome)) = outcomes.next().await {
            match outcome {
                Ok(result) => {
                    sink.emit(&result)?;
                    summary.succeeded += 1;

                    debug!(
                        run_id = %run_id,
                        tweet_index = index,
                        aggregate = result.aggregate,
                        "Tweet scored"
                    );
                    self.event_bus.emit_lossy(PipelineEvent::TweetScored {
                        run_id,
                        index,
                        aggregate: result.aggregate,
                        timestamp: Utc::now(),
                    });
                }
                Err(e) => {
                    summary.failed += 1;
                    let operation = e.operation().map(|op| op.method().to_string());

                    // Continue with other tweets (per-tweet error isolation)
                    error!(
                        run_id = %run_id,
                        tweet_index = index,
                        operation = operation.as_deref().unwrap_or("none"),
                        chars = tweet.text.chars().count(),
                        error = %e,
                        "Tweet pipeline failed"
                    );
                    self.event_bus.emit_lossy(PipelineEvent::TweetFailed {
                        run_id,
                        index,
                        operation,
                        error: e.to_string(),
                        timestamp: Utc::now(),
                    });
                }
            }
        }

        Ok(())
    }
}
