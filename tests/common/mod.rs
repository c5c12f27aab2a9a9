//! Shared helpers for integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use complichat::config::BackendConfig;
use complichat::{ApiClient, MessageStore, SessionController, UploadLifecycleManager};

/// A fully wired conversation pointed at a mock backend
pub struct TestSession {
    pub store: Arc<MessageStore>,
    pub controller: Arc<SessionController>,
    pub uploader: Arc<UploadLifecycleManager>,
}

/// Wire a store, controller, and upload manager against `base_url`
pub fn session_for(base_url: &str) -> TestSession {
    let config = BackendConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    let client = ApiClient::new(&config).expect("client");
    let store = Arc::new(MessageStore::new());
    let controller = Arc::new(SessionController::new(
        client.clone(),
        Arc::clone(&store),
        "Analyzing your query...".to_string(),
    ));
    let uploader = Arc::new(UploadLifecycleManager::new(
        client,
        Arc::clone(&store),
        Arc::clone(&controller),
    ));
    TestSession {
        store,
        controller,
        uploader,
    }
}

/// Minimal successful query reply body
pub fn reply_body(session_id: &str, response: &str) -> Value {
    json!({
        "session_id": session_id,
        "data": { "response": response }
    })
}

/// Query reply body with the full compliance payload
pub fn full_reply_body(session_id: &str) -> Value {
    json!({
        "session_id": session_id,
        "data": {
            "response": "The retention clause is non-compliant.",
            "status": "Non-Compliant",
            "reasoning": "Retention of 10 years exceeds the statutory limit.",
            "sources": [
                {"document_name": "policy.pdf", "page_number": 4, "excerpt": "kept for 10 years"}
            ],
            "relevant_clauses": ["Art. 5(1)(e)"],
            "conversation_type": "compliance_check"
        }
    })
}

/// Write a small PDF-looking fixture file and return its path
pub fn write_pdf(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"%PDF-1.4\n%fixture\n").expect("write fixture");
    path
}
