//! Entity/document sentiment merge
//!
//! `aggregate = mean(magnitudes) * mean(scores)` over the entity and document
//! sentiment of one tweet.

use crate::error::SentimentError;
use crate::models::{AggregateResult, DocumentSentimentResult, EntitySentimentResult, Sentiment};

/// Merge entity and document sentiment for one tweet
///
/// Pure: no I/O, same inputs give the same output. Fails only when a numeric
/// field is NaN or infinite.
pub fn combine(
    text: &str,
    entity: &EntitySentimentResult,
    document: &DocumentSentimentResult,
) -> Result<AggregateResult, SentimentError> {
    ensure_finite("entitySentiment", &entity.entity_sentiment)?;
    ensure_finite("documentSentiment", document)?;
    if !entity.salience.is_finite() {
        return Err(SentimentError::MalformedInput(format!(
            "salience is not a finite number ({})",
            entity.salience
        )));
    }

    let mean_magnitude = (entity.entity_sentiment.magnitude + document.magnitude) / 2.0;
    let mean_score = (entity.entity_sentiment.score + document.score) / 2.0;

    Ok(AggregateResult {
        text: text.to_string(),
        name: entity.name.clone(),
        entity_type: entity.entity_type.clone(),
        salience: entity.salience,
        entity_sentiment: entity.entity_sentiment,
        document_sentiment: *document,
        aggregate: mean_magnitude * mean_score,
    })
}

fn ensure_finite(field: &str, sentiment: &Sentiment) -> Result<(), SentimentError> {
    if sentiment.is_finite() {
        Ok(())
    } else {
        Err(SentimentError::MalformedInput(format!(
            "{} has a non-finite value (magnitude={}, score={})",
            field, sentiment.magnitude, sentiment.score
        )))
    }
}
