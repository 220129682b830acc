//! Tweet input loading
//!
//! Accepted layouts:
//! - JSON array of tweet objects
//! - JSON object with a `tweets` array
//! - JSON Lines (`.jsonl` / `.ndjson`), one tweet object per line
//!
//! The whole file is read into memory; inputs are expected to be small.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::models::TweetRecord;

#[derive(Deserialize)]
#[serde(untagged)]
enum TweetDocument {
    List(Vec<TweetRecord>),
    Wrapped { tweets: Vec<TweetRecord> },
}

impl From<TweetDocument> for Vec<TweetRecord> {
    fn from(document: TweetDocument) -> Self {
        match document {
            TweetDocument::List(tweets) | TweetDocument::Wrapped { tweets } => tweets,
        }
    }
}

/// Read every tweet from `path`, in file order
pub fn read_all(path: &Path) -> Result<Vec<TweetRecord>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tweets = if is_line_delimited(path) {
        parse_json_lines(path, &content)?
    } else {
        parse_document(path, &content)?
    };

    info!(path = %path.display(), count = tweets.len(), "Loaded tweets");
    Ok(tweets)
}

fn is_line_delimited(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsonl") | Some("ndjson")
    )
}

fn parse_document(path: &Path, content: &str) -> Result<Vec<TweetRecord>, SourceError> {
    // Parse strictly first so a bad record reports its real error instead of the
    // generic untagged "did not match any variant" message.
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            line: None,
            source,
        })?;

    let parsed = if value.is_array() {
        serde_json::from_value::<Vec<TweetRecord>>(value)
    } else {
        serde_json::from_value::<TweetDocument>(value).map(Vec::from)
    };

    parsed.map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        line: None,
        source,
    })
}

fn parse_json_lines(path: &Path, content: &str) -> Result<Vec<TweetRecord>, SourceError> {
    let mut tweets = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let tweet = serde_json::from_str(line).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            line: Some(idx + 1),
            source,
        })?;
        tweets.push(tweet);
    }

    debug!(lines = content.lines().count(), parsed = tweets.len(), "Parsed JSON Lines input");
    Ok(tweets)
}
