//! Message store: the single source of truth for the conversation timeline
//!
//! An ordered, append-only-with-in-place-update collection of messages.
//! All operations are atomic with respect to concurrent callers: an
//! interleaved query and upload each see a consistent full list, never a
//! partial one. Mutations go through these operations only; the list is
//! never replaced wholesale from outside.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::session::message::{ActivityPhase, Message, MessageBody, MessageId};

/// Ordered collection of timeline entries with atomic mutation
///
/// Ids come from a monotonic counter, not a timestamp, so entries created
/// within the same instant (two uploads, an upload racing a query) never
/// collide.
#[derive(Debug, Default)]
pub struct MessageStore {
    entries: RwLock<Vec<Message>>,
    next_id: AtomicU64,
}

impl MessageStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry to the end of the timeline
    ///
    /// Allocates a fresh id and returns it so the caller can correlate the
    /// entry with a later update or removal.
    pub fn append(&self, body: MessageBody) -> MessageId {
        let id = MessageId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut entries = self.write_entries();
        entries.push(Message { id, body });
        id
    }

    /// Remove exactly one entry by id
    ///
    /// Unknown ids are a no-op. Returns true if an entry was removed.
    pub fn remove_by_id(&self, id: MessageId) -> bool {
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|m| m.id != id);
        entries.len() != before
    }

    /// Update one entry in place, preserving its position
    ///
    /// Unknown ids are a no-op. Returns true if the entry was found.
    pub fn update_by_id(&self, id: MessageId, f: impl FnOnce(&mut Message)) -> bool {
        let mut entries = self.write_entries();
        match entries.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                f(message);
                true
            }
            None => false,
        }
    }

    /// Settle a loading activity notice in place
    ///
    /// Returns true only if the entry exists and was still loading; see
    /// [`Message::resolve_activity`] for the transition rules.
    pub fn resolve_activity(
        &self,
        id: MessageId,
        outcome: ActivityPhase,
        content: impl Into<String>,
    ) -> bool {
        let mut resolved = false;
        self.update_by_id(id, |message| {
            resolved = message.resolve_activity(outcome, content);
        });
        resolved
    }

    /// Look up one entry by id
    pub fn get(&self, id: MessageId) -> Option<Message> {
        self.read_entries().iter().find(|m| m.id == id).cloned()
    }

    /// Consistent copy of the full timeline, in insertion order
    pub fn snapshot(&self) -> Vec<Message> {
        self.read_entries().clone()
    }

    /// Number of entries in the timeline
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    /// True if the timeline has no entries
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Remove all entries
    ///
    /// Id allocation keeps counting; ids are never reused across a reset.
    pub fn clear(&self) {
        self.write_entries().clear();
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, Vec<Message>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Message>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str) -> MessageBody {
        MessageBody::User {
            content: text.to_string(),
        }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let store = MessageStore::new();
        store.append(user("first"));
        store.append(user("second"));
        store.append(user("third"));

        let contents: Vec<_> = store
            .snapshot()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let store = MessageStore::new();
        let a = store.append(user("a"));
        let b = store.append(user("b"));
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }

    #[test]
    fn test_remove_by_id() {
        let store = MessageStore::new();
        let a = store.append(user("a"));
        let b = store.append(user("b"));

        assert!(store.remove_by_id(a));
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].id, b);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let store = MessageStore::new();
        store.append(user("a"));
        assert!(!store.remove_by_id(MessageId(999)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_by_id_preserves_position() {
        let store = MessageStore::new();
        store.append(user("a"));
        let id = store.append(MessageBody::Activity {
            content: "Uploading report.pdf...".to_string(),
            phase: ActivityPhase::Loading,
        });
        store.append(user("c"));

        assert!(store.resolve_activity(id, ActivityPhase::Success, "ready"));
        let snapshot = store.snapshot();
        assert_eq!(snapshot[1].id, id);
        assert_eq!(snapshot[1].content(), "ready");
        assert_eq!(snapshot[1].activity_phase(), Some(ActivityPhase::Success));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = MessageStore::new();
        assert!(!store.update_by_id(MessageId(42), |m| {
            m.resolve_activity(ActivityPhase::Error, "failed");
        }));
    }

    #[test]
    fn test_resolve_activity_only_once() {
        let store = MessageStore::new();
        let id = store.append(MessageBody::Activity {
            content: "Uploading notes.pdf...".to_string(),
            phase: ActivityPhase::Loading,
        });
        assert!(store.resolve_activity(id, ActivityPhase::Error, "failed"));
        assert!(!store.resolve_activity(id, ActivityPhase::Success, "ready"));
        assert_eq!(store.get(id).unwrap().content(), "failed");
    }

    #[test]
    fn test_round_trip_through_store() {
        let store = MessageStore::new();
        let body = MessageBody::User {
            content: "Is clause 7 GDPR compliant?".to_string(),
        };
        let id = store.append(body.clone());
        let read_back = store.get(id).unwrap();
        assert_eq!(read_back.body, body);
        assert_eq!(read_back.id, id);
    }

    #[test]
    fn test_clear_keeps_id_counter() {
        let store = MessageStore::new();
        let a = store.append(user("a"));
        store.clear();
        assert!(store.is_empty());
        let b = store.append(user("b"));
        assert!(b.0 > a.0, "ids must not be reused across a reset");
    }

    #[test]
    fn test_concurrent_appends_all_land() {
        use std::sync::Arc;

        let store = Arc::new(MessageStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for j in 0..50 {
                    store.append(MessageBody::User {
                        content: format!("{}-{}", i, j),
                    });
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 400);
        let mut ids: Vec<_> = snapshot.iter().map(|m| m.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 400, "ids must be collision-free");
    }
}
