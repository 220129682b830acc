//! Natural-language service client
//!
//! Talks to the Cloud Natural Language v1 REST shape:
//! `POST {endpoint}/documents:analyzeEntitySentiment` and
//! `POST {endpoint}/documents:analyzeSentiment`.
//!
//! One call is one request. No retries, no caching.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::error::{Operation, SentimentError};
use crate::models::{DocumentSentimentResult, EntitySentimentResult, Sentiment};
use crate::services::SentimentService;

pub const DEFAULT_ENDPOINT: &str = "https://language.googleapis.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("tweetscore/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Everything the client needs, resolved once at startup
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    /// Base URL without trailing method, e.g. `https://language.googleapis.com/v1`
    pub endpoint: String,
    /// ISO-639-1 hint; `None` lets the service detect the language
    pub language: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Hand-written so the credential never lands in logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Request body shared by both methods
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    document: RequestDocument<'a>,
    encoding_type: &'static str,
}

#[derive(Debug, Serialize)]
struct RequestDocument<'a> {
    #[serde(rename = "type")]
    doc_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    content: &'a str,
}

impl<'a> AnalyzeRequest<'a> {
    fn plain_text(content: &'a str, language: Option<&'a str>) -> Self {
        Self {
            document: RequestDocument {
                doc_type: "PLAIN_TEXT",
                language,
                content,
            },
            encoding_type: "UTF8",
        }
    }
}

// The service omits zero-valued numbers and default enum values, hence the defaults.

#[derive(Debug, Deserialize)]
struct WireSentiment {
    #[serde(default)]
    magnitude: f64,
    #[serde(default)]
    score: f64,
}

impl From<WireSentiment> for Sentiment {
    fn from(wire: WireSentiment) -> Self {
        Sentiment::new(wire.magnitude, wire.score)
    }
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    name: Option<String>,
    #[serde(rename = "type")]
    entity_type: Option<String>,
    #[serde(default)]
    salience: f64,
    sentiment: Option<WireSentiment>,
}

#[derive(Debug, Deserialize)]
struct EntitySentimentResponse {
    #[serde(default)]
    entities: Vec<WireEntity>,
}

impl EntitySentimentResponse {
    /// First listed entity, which the service ranks highest by salience
    fn into_top_entity(self) -> Result<EntitySentimentResult, SentimentError> {
        let entity = self
            .entities
            .into_iter()
            .next()
            .ok_or(SentimentError::NoEntityFound(Operation::EntitySentiment))?;

        let name = entity.name.ok_or_else(|| {
            SentimentError::MalformedInput("top entity has no name".to_string())
        })?;
        let sentiment = entity.sentiment.ok_or_else(|| {
            SentimentError::MalformedInput(format!("entity '{}' has no sentiment", name))
        })?;

        Ok(EntitySentimentResult {
            name,
            entity_type: entity.entity_type.unwrap_or_else(|| "UNKNOWN".to_string()),
            salience: entity.salience,
            entity_sentiment: sentiment.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentSentimentResponse {
    document_sentiment: Option<WireSentiment>,
}

/// HTTP client for the language service
pub struct LanguageClient {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl LanguageClient {
    pub fn new(config: ClientConfig) -> tweetscore_common::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tweetscore_common::Error::Config(format!("HTTP client build failed: {}", e))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL for one method
    pub fn method_url(&self, operation: Operation) -> String {
        format!(
            "{}/documents:{}",
            self.config.endpoint.trim_end_matches('/'),
            operation.method()
        )
    }

    /// Issue one request and decode the body
    async fn call<T: DeserializeOwned>(
        &self,
        operation: Operation,
        text: &str,
    ) -> Result<T, SentimentError> {
        let request = AnalyzeRequest::plain_text(text, self.config.language.as_deref());

        debug!(
            operation = %operation,
            chars = text.chars().count(),
            "Querying language service"
        );

        let response = self
            .http_client
            .post(self.method_url(operation))
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|source| {
                error!(operation = %operation, error = %source, "Language service request failed");
                SentimentError::Transport { operation, source }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                operation = %operation,
                status = status.as_u16(),
                "Language service returned error status"
            );
            return Err(SentimentError::RemoteService {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.text().await.map_err(|source| {
            error!(operation = %operation, error = %source, "Reading language service response failed");
            SentimentError::Transport { operation, source }
        })?;

        serde_json::from_str(&payload).map_err(|e| {
            error!(operation = %operation, error = %e, "Language service response not understood");
            SentimentError::MalformedInput(format!("{} response: {}", operation, e))
        })
    }
}

#[async_trait]
impl SentimentService for LanguageClient {
    async fn fetch_entity_sentiment(
        &self,
        text: &str,
    ) -> Result<EntitySentimentResult, SentimentError> {
        let operation = Operation::EntitySentiment;
        let response: EntitySentimentResponse = self.call(operation, text).await?;

        let entity = response.into_top_entity().map_err(|e| {
            warn!(operation = %operation, error = %e, "No usable entity in response");
            e
        })?;

        debug!(
            entity = %entity.name,
            salience = entity.salience,
            "Entity sentiment received"
        );
        Ok(entity)
    }

    async fn fetch_document_sentiment(
        &self,
        text: &str,
    ) -> Result<DocumentSentimentResult, SentimentError> {
        let operation = Operation::DocumentSentiment;
        let response: DocumentSentimentResponse = self.call(operation, text).await?;

        response
            .document_sentiment
            .map(Sentiment::from)
            .ok_or_else(|| {
                warn!(operation = %operation, "Response has no documentSentiment");
                SentimentError::MalformedInput(format!("{} response has no documentSentiment", operation))
            })
    }
}
