//! Document upload lifecycle
//!
//! Drives the optimistic loading→success|error progression of a single
//! document-ingestion attempt, represented as one evolving system notice
//! in the timeline. Uploads are fully independent of query submission:
//! both may be in flight at once, each correlated to its own entry id.

use std::path::Path;
use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::{ComplichatError, Result};
use crate::session::controller::SessionController;
use crate::session::message::{ActivityPhase, MessageBody, MessageId};
use crate::session::store::MessageStore;

/// Outcome of a completed upload attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The document was ingested; the success notice carries this id
    Ready(MessageId),
    /// Ingestion failed; the error notice carries this id
    Failed(MessageId),
}

/// Drives the upload lifecycle for PDF documents
pub struct UploadLifecycleManager {
    store: Arc<MessageStore>,
    client: ApiClient,
    controller: Arc<SessionController>,
}

impl UploadLifecycleManager {
    /// Create an upload manager sharing the conversation's store and state
    pub fn new(
        client: ApiClient,
        store: Arc<MessageStore>,
        controller: Arc<SessionController>,
    ) -> Self {
        Self {
            store,
            client,
            controller,
        }
    }

    /// Upload one PDF document for analysis
    ///
    /// A file whose name does not end in `.pdf` (case-sensitive) is
    /// rejected before any timeline mutation or network request. Past
    /// that check, a loading notice is appended and settled exactly once
    /// with the outcome: on success the notice becomes
    /// `Document "<name>" ready for analysis.` and the document becomes
    /// the active one; on any failure (an unreadable file or a failed
    /// request) the notice becomes `Failed to upload <name>.` and the
    /// active document is untouched.
    ///
    /// The file handle is scope-bound, so the same path can always be
    /// re-selected for another attempt.
    ///
    /// # Errors
    ///
    /// Returns an error only for the file-type pre-flight rejection; any
    /// later failure is reported through the timeline and the
    /// [`UploadOutcome::Failed`] value.
    pub async fn upload_document(&self, path: &Path) -> Result<UploadOutcome> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                ComplichatError::Validation(format!("Not a file path: {}", path.display()))
            })?;

        if !name.ends_with(".pdf") {
            return Err(
                ComplichatError::Validation(format!("Please upload a PDF file: {}", name)).into(),
            );
        }

        let id = self.store.append(MessageBody::Activity {
            content: format!("Uploading {}...", name),
            phase: ActivityPhase::Loading,
        });

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", path.display(), e);
                self.store.resolve_activity(
                    id,
                    ActivityPhase::Error,
                    format!("Failed to upload {}.", name),
                );
                return Ok(UploadOutcome::Failed(id));
            }
        };

        match self.client.ingest(&name, bytes).await {
            Ok(()) => {
                self.store.resolve_activity(
                    id,
                    ActivityPhase::Success,
                    format!("Document \"{}\" ready for analysis.", name),
                );
                self.controller.set_active_document(name);
                Ok(UploadOutcome::Ready(id))
            }
            Err(e) => {
                tracing::warn!("Upload failed for {}: {}", name, e);
                self.store.resolve_activity(
                    id,
                    ActivityPhase::Error,
                    format!("Failed to upload {}.", name),
                );
                Ok(UploadOutcome::Failed(id))
            }
        }
    }
}
