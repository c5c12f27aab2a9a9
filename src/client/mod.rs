//! HTTP client for the compliance-analysis backend
//!
//! This module wraps the two backend endpoints the client consumes:
//! `POST /query/` (JSON) and `POST /ingest/` (multipart document upload).
//! Every request is bounded by the configured timeout; a timed-out request
//! is reported as a backend failure like any other network error.

pub mod types;

pub use types::{AnalysisData, QueryReply, QueryRequest};

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::config::BackendConfig;
use crate::error::{ComplichatError, Result};

/// Client for the compliance-analysis backend
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new backend client
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("complichat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ComplichatError::Api(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized backend client: base_url={}, timeout={}s",
            config.base_url,
            config.timeout_seconds
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a query, echoing the session id when one is pinned
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, timeout, a non-2xx status,
    /// or a reply body that does not match the expected shape.
    pub async fn query(&self, query: &str, session_id: Option<&str>) -> Result<QueryReply> {
        let url = format!("{}/query/", self.base_url);
        tracing::debug!("Submitting query: url={}, session_id={:?}", url, session_id);

        let response = self
            .http
            .post(&url)
            .json(&QueryRequest { query, session_id })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Query request failed: {}", e);
                ComplichatError::Api(format!("Query request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Backend returned error {}: {}", status, error_text);
            return Err(ComplichatError::Api(format!(
                "Backend returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let reply: QueryReply = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse query reply: {}", e);
            ComplichatError::Api(format!("Failed to parse query reply: {}", e))
        })?;

        Ok(reply)
    }

    /// Upload a document for ingestion
    ///
    /// The file travels as a multipart body under the single field `files`.
    /// The reply body is not consumed beyond the status code.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, timeout, or a non-2xx status.
    pub async fn ingest(&self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let url = format!("{}/ingest/", self.base_url);
        tracing::debug!(
            "Uploading document: url={}, name={}, size={}",
            url,
            file_name,
            bytes.len()
        );

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("files", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Ingestion request failed: {}", e);
                ComplichatError::Api(format!("Ingestion request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Ingestion returned error {}: {}", status, error_text);
            return Err(ComplichatError::Api(format!(
                "Ingestion returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        tracing::info!("Document ingested: name={}", file_name);
        Ok(())
    }
}
