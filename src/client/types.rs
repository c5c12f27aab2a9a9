//! Wire types for the compliance-analysis backend API

use serde::{Deserialize, Serialize};

use crate::session::message::{Analysis, ComplianceStatus, SourceRef};

/// Request body for `POST /query/`
///
/// `session_id` is omitted entirely on the first query of a conversation;
/// the backend mints one and returns it in the reply.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Response body of `POST /query/`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryReply {
    pub session_id: String,
    pub data: AnalysisData,
}

/// Analysis payload inside a query reply
///
/// Everything except the conversational `response` text is optional; the
/// backend omits the compliance fields for small-talk turns.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisData {
    pub response: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default)]
    pub relevant_clauses: Vec<String>,
    #[serde(default)]
    pub conversation_type: Option<String>,
}

impl AnalysisData {
    /// Convert the wire payload into the timeline analysis payload
    ///
    /// Status labels the client does not know are dropped rather than
    /// failing the whole reply.
    pub fn into_analysis(self) -> (String, Analysis) {
        let status = self.status.as_deref().and_then(ComplianceStatus::parse_str);
        (
            self.response,
            Analysis {
                status,
                reasoning: self.reasoning,
                sources: self.sources,
                relevant_clauses: self.relevant_clauses,
                conversation_type: self.conversation_type,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_request_omits_unset_session_id() {
        let request = QueryRequest {
            query: "Is this compliant?",
            session_id: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"query": "Is this compliant?"}));
    }

    #[test]
    fn test_query_request_echoes_session_id() {
        let request = QueryRequest {
            query: "And clause 7?",
            session_id: Some("abc123"),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"query": "And clause 7?", "session_id": "abc123"})
        );
    }

    #[test]
    fn test_reply_with_full_payload() {
        let body = json!({
            "session_id": "abc123",
            "data": {
                "response": "The clause is non-compliant.",
                "status": "Non-Compliant",
                "reasoning": "Retention period exceeds the limit.",
                "sources": [
                    {"document_name": "policy.pdf", "page_number": 4, "excerpt": "kept for 10 years"}
                ],
                "relevant_clauses": ["Art. 5(1)(e)"],
                "conversation_type": "compliance_check"
            }
        });
        let reply: QueryReply = serde_json::from_value(body).unwrap();
        assert_eq!(reply.session_id, "abc123");

        let (response, analysis) = reply.data.into_analysis();
        assert_eq!(response, "The clause is non-compliant.");
        assert_eq!(analysis.status, Some(ComplianceStatus::NonCompliant));
        assert_eq!(analysis.sources.len(), 1);
        assert_eq!(analysis.sources[0].page_number, Some(4));
        assert_eq!(analysis.relevant_clauses, vec!["Art. 5(1)(e)"]);
    }

    #[test]
    fn test_reply_with_minimal_payload() {
        let body = json!({
            "session_id": "abc123",
            "data": {"response": "Hello! Upload a document to get started."}
        });
        let reply: QueryReply = serde_json::from_value(body).unwrap();
        let (response, analysis) = reply.data.into_analysis();
        assert_eq!(response, "Hello! Upload a document to get started.");
        assert!(analysis.is_empty());
    }

    #[test]
    fn test_unknown_status_label_is_dropped() {
        let body = json!({
            "session_id": "abc123",
            "data": {"response": "Partially fine.", "status": "Mostly-Compliant"}
        });
        let reply: QueryReply = serde_json::from_value(body).unwrap();
        let (_, analysis) = reply.data.into_analysis();
        assert_eq!(analysis.status, None);
    }

    #[test]
    fn test_missing_response_field_is_an_error() {
        let body = json!({"session_id": "abc123", "data": {}});
        assert!(serde_json::from_value::<QueryReply>(body).is_err());
    }
}
