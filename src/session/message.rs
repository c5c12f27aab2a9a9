//! Message timeline entities
//!
//! A conversation timeline is an ordered list of [`Message`] entries. Each
//! entry is a tagged variant over its role and lifecycle state, so illegal
//! transitions (e.g. a finished upload notice going back to loading) are
//! unrepresentable through the public API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier for one timeline entry
///
/// Ids are allocated by the [`MessageStore`](super::MessageStore) from a
/// monotonic counter, so two entries created within the same instant never
/// collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub(crate) u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// Role of a timeline entry, as presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::System => write!(f, "system"),
        }
    }
}

/// Lifecycle phase of a system activity notice (e.g. a document upload)
///
/// A notice starts in `Loading` and transitions exactly once, to either
/// `Success` or `Error`. It never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityPhase {
    Loading,
    Success,
    Error,
}

/// Compliance verdict attached to an assistant response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "Compliant")]
    Compliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
    #[serde(rename = "Needs Review")]
    NeedsReview,
}

impl ComplianceStatus {
    /// Parse a backend-supplied status label
    ///
    /// Unknown labels yield `None` rather than an error; the backend may
    /// grow new labels and a reply should still render.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "Compliant" => Some(Self::Compliant),
            "Non-Compliant" => Some(Self::NonCompliant),
            "Needs Review" => Some(Self::NeedsReview),
            _ => None,
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => write!(f, "Compliant"),
            Self::NonCompliant => write!(f, "Non-Compliant"),
            Self::NeedsReview => write!(f, "Needs Review"),
        }
    }
}

/// A document passage cited by an assistant response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub document_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Structured analysis payload carried by a final assistant response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplianceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relevant_clauses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_type: Option<String>,
}

impl Analysis {
    /// Returns true if the payload carries nothing beyond the reply text
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.reasoning.is_none()
            && self.sources.is_empty()
            && self.relevant_clauses.is_empty()
            && self.conversation_type.is_none()
    }
}

/// Body of a timeline entry
///
/// The variants encode both the role and the lifecycle state of the entry:
///
/// - `User`: an echoed user query, immutable once appended
/// - `Assistant`: a final assistant reply with its analysis payload
/// - `Thinking`: a transient assistant placeholder awaiting a reply; always
///   removed from the timeline, never transitioned in place
/// - `Activity`: a system notice tracking an async operation (upload); the
///   only variant that mutates in place, via [`Message::resolve_activity`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    User {
        content: String,
    },
    Assistant {
        content: String,
        #[serde(default)]
        analysis: Analysis,
    },
    Thinking {
        content: String,
    },
    Activity {
        content: String,
        phase: ActivityPhase,
    },
}

/// One timeline entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub body: MessageBody,
}

impl Message {
    /// Role of this entry as presented to the user
    pub fn role(&self) -> Role {
        match self.body {
            MessageBody::User { .. } => Role::User,
            MessageBody::Assistant { .. } | MessageBody::Thinking { .. } => Role::Assistant,
            MessageBody::Activity { .. } => Role::System,
        }
    }

    /// Display text of this entry
    pub fn content(&self) -> &str {
        match &self.body {
            MessageBody::User { content }
            | MessageBody::Assistant { content, .. }
            | MessageBody::Thinking { content }
            | MessageBody::Activity { content, .. } => content,
        }
    }

    /// True for the transient assistant placeholder awaiting a reply
    pub fn is_thinking(&self) -> bool {
        matches!(self.body, MessageBody::Thinking { .. })
    }

    /// Activity phase of a system notice, if this entry is one
    pub fn activity_phase(&self) -> Option<ActivityPhase> {
        match self.body {
            MessageBody::Activity { phase, .. } => Some(phase),
            _ => None,
        }
    }

    /// Analysis payload of a final assistant reply, if this entry is one
    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.body {
            MessageBody::Assistant { analysis, .. } => Some(analysis),
            _ => None,
        }
    }

    /// Settle a loading activity notice
    ///
    /// The only legal in-place mutation of a timeline entry: an `Activity`
    /// in `Loading` phase moves to `Success` or `Error` with new display
    /// text. Returns false (and leaves the entry untouched) for any other
    /// entry, an already-settled notice, or a `Loading` target phase.
    pub fn resolve_activity(&mut self, outcome: ActivityPhase, content: impl Into<String>) -> bool {
        if outcome == ActivityPhase::Loading {
            return false;
        }
        match &mut self.body {
            MessageBody::Activity { phase, content: c } if *phase == ActivityPhase::Loading => {
                *phase = outcome;
                *c = content.into();
                true
            }
            _ => false,
        }
    }
}
