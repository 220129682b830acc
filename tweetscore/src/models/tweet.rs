//! Tweet input record

use serde::{Deserialize, Serialize};

/// One tweet from the input file
///
/// Only `text` is read; any other fields in the source document are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetRecord {
    pub text: String,
}

impl TweetRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
