//! tweetscore library interface
//!
//! Scores tweets by combining entity-level and document-level sentiment from a
//! natural-language service. Exposed as a library for integration testing.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::{Overrides, Settings};
pub use crate::error::{Operation, SentimentError, SourceError};
pub use crate::models::{AggregateResult, DocumentSentimentResult, EntitySentimentResult, Sentiment, TweetRecord};
pub use crate::services::{BatchConfig, BatchDriver, BatchSummary, OutputOrder, OutputSink, SentimentService};
