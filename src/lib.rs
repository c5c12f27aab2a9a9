//! Complichat - compliance-analysis chat client library
//!
//! This library provides the client-side controller of an interactive
//! compliance-analysis chat assistant: conversation state management,
//! query submission, and the document-upload lifecycle against a backend
//! analysis service.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Message timeline, session controller, and upload lifecycle
//! - `client`: HTTP client for the backend query and ingestion endpoints
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Command handlers (interactive chat, one-shot query/ingest)
//! - `render`: Terminal rendering of timeline entries
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use complichat::{ApiClient, Config, MessageStore, SessionController};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = ApiClient::new(&config.backend)?;
//!     let store = Arc::new(MessageStore::new());
//!     let controller =
//!         SessionController::new(client, store, config.chat.thinking_notice.clone());
//!
//!     controller.submit_query("Is clause 7 GDPR compliant?").await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::Config;
pub use error::{ComplichatError, Result};
pub use session::{
    MessageStore, SessionController, SubmitOutcome, UploadLifecycleManager, UploadOutcome,
};

#[cfg(test)]
pub mod test_utils;
