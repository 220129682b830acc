//! Sentiment records
//!
//! Field names serialize in camelCase to match the language service and the
//! printed output (`entitySentiment`, `documentSentiment`).

use serde::{Deserialize, Serialize};

/// Magnitude/score pair
///
/// `magnitude` is non-negative emotional weight (unbounded above).
/// `score` is polarity in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sentiment {
    pub magnitude: f64,
    pub score: f64,
}

impl Sentiment {
    pub fn new(magnitude: f64, score: f64) -> Self {
        Self { magnitude, score }
    }

    pub fn is_finite(&self) -> bool {
        self.magnitude.is_finite() && self.score.is_finite()
    }
}

/// Document-level sentiment is the bare magnitude/score pair
pub type DocumentSentimentResult = Sentiment;

/// Sentiment of the most salient entity in a tweet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySentimentResult {
    pub name: String,
    /// Service entity type (`PERSON`, `ORGANIZATION`, `OTHER`, ...)
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Centrality of the entity in [0, 1]
    pub salience: f64,
    pub entity_sentiment: Sentiment,
}

/// Combined per-tweet output record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// Tweet text, unmodified
    pub text: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub salience: f64,
    pub entity_sentiment: Sentiment,
    pub document_sentiment: Sentiment,
    /// Mean magnitude times mean score
    pub aggregate: f64,
}
