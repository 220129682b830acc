//! Shared test helpers
//!
//! - `ScriptedService`: in-process `SentimentService` with per-text failures and delays
//! - `CollectingSink` / `FailingSink`: output sinks for assertions
//! - `mock_language_service`: axum stand-in for the HTTP language service

#![allow(dead_code)]

pub mod mock_language_service;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tweetscore::models::{AggregateResult, DocumentSentimentResult, EntitySentimentResult, Sentiment, TweetRecord};
use tweetscore::{Operation, OutputSink, SentimentError, SentimentService};

/// Entity sentiment returned for every successful call
pub const ENTITY_SENTIMENT: Sentiment = Sentiment {
    magnitude: 0.8,
    score: 0.6,
};

/// Document sentiment returned for every successful call
pub const DOCUMENT_SENTIMENT: Sentiment = Sentiment {
    magnitude: 0.4,
    score: -0.2,
};

/// Scripted failure for one tweet text
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Status(u16),
    NoEntity,
    Malformed,
}

impl Failure {
    fn into_error(self, operation: Operation) -> SentimentError {
        match self {
            Failure::Status(status) => SentimentError::RemoteService {
                operation,
                status,
                body: "scripted failure".to_string(),
            },
            Failure::NoEntity => SentimentError::NoEntityFound(operation),
            Failure::Malformed => {
                SentimentError::MalformedInput(format!("{} scripted malformed response", operation))
            }
        }
    }
}

/// Stub language service
#[derive(Default)]
pub struct ScriptedService {
    failures: HashMap<String, (Operation, Failure)>,
    delays: HashMap<String, Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    calls: Mutex<Vec<(Operation, String)>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `operation` whenever it is called with `text`
    pub fn fail_on(mut self, text: &str, operation: Operation, failure: Failure) -> Self {
        self.failures.insert(text.to_string(), (operation, failure));
        self
    }

    /// Delay every call for `text`
    pub fn delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    /// Delay every call for every one of `texts`
    pub fn delay_all(mut self, texts: &[String], delay: Duration) -> Self {
        for text in texts {
            self.delays.insert(text.clone(), delay);
        }
        self
    }

    /// Calls in the order they were made
    pub fn calls(&self) -> Vec<(Operation, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls().iter().filter(|(op, _)| *op == operation).count()
    }

    /// Highest number of simultaneously outstanding calls
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, operation: Operation, text: &str) -> Result<(), SentimentError> {
        self.calls.lock().unwrap().push((operation, text.to_string()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.failures.get(text) {
            Some((op, failure)) if *op == operation => Err(failure.into_error(operation)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SentimentService for ScriptedService {
    async fn fetch_entity_sentiment(
        &self,
        text: &str,
    ) -> Result<EntitySentimentResult, SentimentError> {
        self.enter(Operation::EntitySentiment, text).await?;

        Ok(EntitySentimentResult {
            name: text.split_whitespace().next().unwrap_or_default().to_string(),
            entity_type: "OTHER".to_string(),
            salience: 1.0,
            entity_sentiment: ENTITY_SENTIMENT,
        })
    }

    async fn fetch_document_sentiment(
        &self,
        text: &str,
    ) -> Result<DocumentSentimentResult, SentimentError> {
        self.enter(Operation::DocumentSentiment, text).await?;
        Ok(DOCUMENT_SENTIMENT)
    }
}

/// Sink that keeps every emitted record
#[derive(Default)]
pub struct CollectingSink {
    pub results: Vec<AggregateResult>,
}

impl CollectingSink {
    pub fn texts(&self) -> Vec<String> {
        self.results.iter().map(|r| r.text.clone()).collect()
    }
}

impl OutputSink for CollectingSink {
    fn emit(&mut self, result: &AggregateResult) -> std::io::Result<()> {
        self.results.push(result.clone());
        Ok(())
    }
}

/// Sink that rejects every write
pub struct FailingSink;

impl OutputSink for FailingSink {
    fn emit(&mut self, _result: &AggregateResult) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        ))
    }
}

/// Tweets "tweet 0" .. "tweet {n-1}"
pub fn numbered_tweets(n: usize) -> Vec<TweetRecord> {
    (0..n).map(|i| TweetRecord::new(format!("tweet {}", i))).collect()
}
