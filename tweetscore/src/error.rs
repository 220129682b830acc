//! Error types for tweetscore
//!
//! `SentimentError` covers a single tweet's pipeline and never aborts a batch.
//! `SourceError` covers reading the input and is fatal to the run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Remote operation offered by the language service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `documents:analyzeEntitySentiment`
    EntitySentiment,
    /// `documents:analyzeSentiment`
    DocumentSentiment,
}

impl Operation {
    /// Method name as it appears in the endpoint path
    pub fn method(&self) -> &'static str {
        match self {
            Operation::EntitySentiment => "analyzeEntitySentiment",
            Operation::DocumentSentiment => "analyzeSentiment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Per-tweet pipeline errors
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Request never produced an HTTP response (connect, DNS, timeout, body read)
    #[error("Transport error during {operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-success status
    #[error("Remote service returned {status} during {operation}: {body}")]
    RemoteService {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// Entity-sentiment response listed no entities
    #[error("No entity found in {0} response")]
    NoEntityFound(Operation),

    /// Response or record is missing a field or carries a non-finite number
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl SentimentError {
    /// Remote operation that failed, if any
    pub fn operation(&self) -> Option<Operation> {
        match self {
            SentimentError::Transport { operation, .. }
            | SentimentError::RemoteService { operation, .. }
            | SentimentError::NoEntityFound(operation) => Some(*operation),
            SentimentError::MalformedInput(_) => None,
        }
    }

    /// HTTP status for `RemoteService` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            SentimentError::RemoteService { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Input file errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `line` is set for line-delimited input
    #[error("Failed to parse {}{}: {}", path.display(), line_suffix(*line), source)]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },
}

fn line_suffix(line: Option<usize>) -> String {
    line.map(|l| format!(" (line {})", l)).unwrap_or_default()
}
