//! Data models for tweetscore
//!
//! Input records, normalized sentiment records and the combined output record.

pub mod sentiment;
pub mod tweet;

pub use sentiment::{AggregateResult, DocumentSentimentResult, EntitySentimentResult, Sentiment};
pub use tweet::TweetRecord;
