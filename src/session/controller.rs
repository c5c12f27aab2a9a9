//! Session controller: query submission and conversation lifecycle
//!
//! The controller orchestrates a query round-trip against the local
//! timeline: it appends the user message and a thinking placeholder before
//! the network call, then reconciles the timeline with the real outcome.
//! It also owns the session-wide state (`session_id`, `active_document`,
//! `busy`) so a second conversation is just a second controller instance.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::client::ApiClient;
use crate::session::message::{ActivityPhase, MessageBody, MessageId};
use crate::session::store::MessageStore;

/// Notice appended to the timeline when a query round-trip fails
pub const QUERY_ERROR_NOTICE: &str = "Error generating response. Please check your connection.";

/// Outcome of a [`SessionController::submit_query`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend answered; the final assistant message carries this id
    Answered(MessageId),
    /// The round-trip failed; the error notice carries this id
    Failed(MessageId),
    /// Rejected before any effect: the query text trimmed to nothing
    RejectedEmpty,
    /// Rejected before any effect: another query is still in flight
    RejectedBusy,
    /// The session was reset while the request was in flight; the reply
    /// was discarded without touching the new timeline
    Discarded,
}

/// Releases the busy flag when dropped
///
/// Tied to the submission scope so the flag is released on every exit
/// path, including a panic inside the reconciliation code.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Orchestrates query submission against the shared message store
///
/// At most one query is outstanding at a time; the `busy` flag guards
/// query submission only and never blocks document uploads.
pub struct SessionController {
    store: Arc<MessageStore>,
    client: ApiClient,
    busy: AtomicBool,
    session_id: RwLock<Option<String>>,
    active_document: RwLock<Option<String>>,
    generation: AtomicU64,
    thinking_notice: String,
}

impl SessionController {
    /// Create a controller bound to a store and backend client
    pub fn new(client: ApiClient, store: Arc<MessageStore>, thinking_notice: String) -> Self {
        Self {
            store,
            client,
            busy: AtomicBool::new(false),
            session_id: RwLock::new(None),
            active_document: RwLock::new(None),
            generation: AtomicU64::new(0),
            thinking_notice,
        }
    }

    /// The shared message store backing this conversation
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    /// Session-correlation identifier, once the first query has succeeded
    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Name of the most recently ingested document, if any
    pub fn active_document(&self) -> Option<String> {
        self.active_document
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// True while a query round-trip is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Record the most recently ingested document
    ///
    /// Called by the upload lifecycle on success only.
    pub(crate) fn set_active_document(&self, name: String) {
        let mut active = self
            .active_document
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *active = Some(name);
    }

    /// Submit a user query and reconcile the timeline with the outcome
    ///
    /// Effects, strictly in order: the busy flag is taken, the user message
    /// appended, the thinking placeholder appended, and only then the
    /// request issued. On completion the placeholder is removed and
    /// replaced by either the final assistant message or the error notice.
    /// The user message is never rolled back.
    ///
    /// An empty (after trimming) query or a submission while another query
    /// is in flight is rejected with no state change and no request sent.
    pub async fn submit_query(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::RejectedEmpty;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Query rejected: another query is in flight");
            return SubmitOutcome::RejectedBusy;
        }
        let _busy = BusyGuard(&self.busy);

        let generation = self.generation.load(Ordering::SeqCst);

        self.store.append(MessageBody::User {
            content: text.to_string(),
        });
        let thinking_id = self.store.append(MessageBody::Thinking {
            content: self.thinking_notice.clone(),
        });

        let session_id = self.session_id();
        let result = self.client.query(text, session_id.as_deref()).await;

        // A reset that happened mid-flight cleared the timeline; this
        // reply belongs to the old conversation and must not touch the
        // new one. The placeholder removal covers a reset that raced the
        // appends above (otherwise it is a no-op on the cleared list);
        // the busy release still happens via the guard.
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding query reply from a reset conversation");
            self.store.remove_by_id(thinking_id);
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(reply) => {
                self.store.remove_by_id(thinking_id);
                self.pin_session_id(reply.session_id);
                let (content, analysis) = reply.data.into_analysis();
                let id = self
                    .store
                    .append(MessageBody::Assistant { content, analysis });
                SubmitOutcome::Answered(id)
            }
            Err(e) => {
                tracing::warn!("Query failed: {}", e);
                self.store.remove_by_id(thinking_id);
                let id = self.store.append(MessageBody::Activity {
                    content: QUERY_ERROR_NOTICE.to_string(),
                    phase: ActivityPhase::Error,
                });
                SubmitOutcome::Failed(id)
            }
        }
    }

    /// Start a new conversation
    ///
    /// Clears the timeline and forgets the session id and active document.
    /// Does not touch the busy flag and does not cancel an in-flight
    /// request; a reply from before the reset is discarded on arrival.
    pub fn reset_session(&self) {
        tracing::info!("Resetting session");
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.store.clear();
        let mut session_id = self.session_id.write().unwrap_or_else(|e| e.into_inner());
        *session_id = None;
        drop(session_id);
        let mut active = self
            .active_document
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *active = None;
    }

    /// Pin the session-correlation identifier from the first successful reply
    ///
    /// Once set, the id never changes until an explicit reset; later
    /// replies cannot overwrite it.
    fn pin_session_id(&self, id: String) {
        let mut session_id = self.session_id.write().unwrap_or_else(|e| e.into_inner());
        if session_id.is_none() {
            tracing::debug!("Pinned session id: {}", id);
            *session_id = Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn controller() -> SessionController {
        let client = ApiClient::new(&BackendConfig::default()).unwrap();
        SessionController::new(
            client,
            Arc::new(MessageStore::new()),
            "Analyzing your query...".to_string(),
        )
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_effects() {
        let controller = controller();
        assert_eq!(
            controller.submit_query("   ").await,
            SubmitOutcome::RejectedEmpty
        );
        assert!(controller.store().is_empty());
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_initial_state() {
        let controller = controller();
        assert_eq!(controller.session_id(), None);
        assert_eq!(controller.active_document(), None);
        assert!(!controller.is_busy());
        assert!(controller.store().is_empty());
    }

    #[test]
    fn test_reset_clears_all_session_state() {
        let controller = controller();
        controller.store().append(MessageBody::User {
            content: "q".to_string(),
        });
        controller.set_active_document("report.pdf".to_string());
        controller.pin_session_id("abc123".to_string());

        controller.reset_session();

        assert!(controller.store().is_empty());
        assert_eq!(controller.session_id(), None);
        assert_eq!(controller.active_document(), None);
    }

    #[test]
    fn test_session_id_pins_only_once() {
        let controller = controller();
        controller.pin_session_id("first".to_string());
        controller.pin_session_id("second".to_string());
        assert_eq!(controller.session_id(), Some("first".to_string()));
    }

    #[test]
    fn test_busy_guard_releases_on_drop() {
        let busy = AtomicBool::new(true);
        {
            let _guard = BusyGuard(&busy);
        }
        assert!(!busy.load(Ordering::SeqCst));
    }
}
