//! Conversation and session state management
//!
//! The core of the client: an ordered message timeline ([`MessageStore`]),
//! a query orchestrator ([`SessionController`]) that mutates the timeline
//! optimistically around the network round-trip, and an independent
//! document-upload lifecycle ([`UploadLifecycleManager`]).

pub mod controller;
pub mod message;
pub mod store;
pub mod upload;

pub use controller::{SessionController, SubmitOutcome, QUERY_ERROR_NOTICE};
pub use message::{
    ActivityPhase, Analysis, ComplianceStatus, Message, MessageBody, MessageId, Role, SourceRef,
};
pub use store::MessageStore;
pub use upload::{UploadLifecycleManager, UploadOutcome};
