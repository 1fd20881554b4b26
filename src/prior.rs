//! Previous run's output document
//!
//! Drift detection reads the prior document through a `PriorDocumentSource`
//! so the pipeline never reaches into global state.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Prior state errors
#[derive(Error, Debug)]
pub enum PriorStateError {
    #[error("No previous document configured")]
    NotConfigured,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PriorStateResult<T> = Result<T, PriorStateError>;

/// Where the previous document comes from
#[async_trait]
pub trait PriorDocumentSource: Send + Sync {
    async fn fetch(&self) -> PriorStateResult<JsonValue>;

    fn describe(&self) -> String;
}

/// Local JSON file, usually last run's output
pub struct FileDocumentSource {
    path: PathBuf,
}

impl FileDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PriorDocumentSource for FileDocumentSource {
    async fn fetch(&self) -> PriorStateResult<JsonValue> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// JSON document served over HTTP(S)
pub struct HttpDocumentSource {
    url: String,
    client: Client,
}

impl HttpDocumentSource {
    pub fn new(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl PriorDocumentSource for HttpDocumentSource {
    async fn fetch(&self) -> PriorStateResult<JsonValue> {
        debug!("Fetching previous document from {}", self.url);
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(PriorStateError::HttpStatus {
                url: self.url.clone(),
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// No previous run; every fetch fails
pub struct NoPriorDocument;

#[async_trait]
impl PriorDocumentSource for NoPriorDocument {
    async fn fetch(&self) -> PriorStateResult<JsonValue> {
        Err(PriorStateError::NotConfigured)
    }

    fn describe(&self) -> String {
        "none".to_string()
    }
}

/// Fixed document held in memory
pub struct InMemoryDocumentSource {
    document: JsonValue,
}

impl InMemoryDocumentSource {
    pub fn new(document: JsonValue) -> Self {
        Self { document }
    }
}

#[async_trait]
impl PriorDocumentSource for InMemoryDocumentSource {
    async fn fetch(&self) -> PriorStateResult<JsonValue> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Pick a source for a path or URL; `None` means no previous document.
pub fn source_for(location: Option<&str>, client: &Client) -> Box<dyn PriorDocumentSource> {
    match location {
        None => Box::new(NoPriorDocument),
        Some(loc) if loc.starts_with("http://") || loc.starts_with("https://") => {
            Box::new(HttpDocumentSource::new(loc, client.clone()))
        }
        Some(path) => Box::new(FileDocumentSource::new(path)),
    }
}
