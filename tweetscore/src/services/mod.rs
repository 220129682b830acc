//! Service modules for the scoring pipeline
//!
//! Reader → driver → (language service ×2 per tweet) → aggregator → output sink

pub mod aggregator;
pub mod batch_driver;
pub mod language_client;
pub mod output_sink;
pub mod tweet_reader;

pub use aggregator::combine;
pub use batch_driver::{BatchConfig, BatchDriver, BatchSummary, OutputOrder};
pub use language_client::{ClientConfig, LanguageClient};
pub use output_sink::{JsonLinesSink, OutputSink, PrettyJsonSink};
pub use tweet_reader::read_all;

use async_trait::async_trait;

use crate::error::SentimentError;
use crate::models::{DocumentSentimentResult, EntitySentimentResult};

/// Remote sentiment capability
///
/// `LanguageClient` is the production implementation; tests substitute stubs.
#[async_trait]
pub trait SentimentService: Send + Sync {
    /// Sentiment of the highest-salience entity in `text`
    ///
    /// Fails with `NoEntityFound` when the service reports no entities.
    async fn fetch_entity_sentiment(
        &self,
        text: &str,
    ) -> Result<EntitySentimentResult, SentimentError>;

    /// Sentiment of `text` as a whole
    async fn fetch_document_sentiment(
        &self,
        text: &str,
    ) -> Result<DocumentSentimentResult, SentimentError>;
}
