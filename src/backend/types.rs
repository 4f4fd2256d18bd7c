use serde::{Deserialize, Deserializer, Serialize};

use crate::session::ClickstreamEvent;

/// Message in a wizard conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions that seed the conversation
    System,
    /// Typed by the end user
    User,
    /// Produced by the model or the widget
    Assistant,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Full transcript, system prompt first
    pub messages: Vec<Message>,
}

/// Response from `POST /api/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// False when the model call failed
    pub success: bool,
    /// Assistant text on success
    #[serde(default)]
    pub reply: Option<String>,
    /// Failure reason when `success` is false
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatRequest {
    /// Wrap a full transcript
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

/// An existing incident as returned by `GET /incidents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Incident number, e.g. `INC0010001`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub number: String,
    /// Long description used for duplicate scoring
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Newline-separated reports merged into this incident
    #[serde(default, deserialize_with = "null_as_empty")]
    pub u_related_issues: String,
    /// Backend record id, when returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_id: Option<String>,
}

/// ServiceNow-style tables hand back `null` for blank text columns.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /compare_descriptions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareRequest {
    /// New report's description
    pub description1: String,
    /// Existing incident's description
    pub description2: String,
}

/// Response from `POST /compare_descriptions`
#[derive(Debug, Clone, Deserialize)]
pub struct CompareResponse {
    /// False when scoring failed
    pub success: bool,
    /// Score in `[0, 1]` on success
    #[serde(default)]
    pub similarity: Option<f64>,
    /// Failure reason when `success` is false
    #[serde(default)]
    pub error: Option<String>,
}

impl CompareRequest {
    /// Pair two descriptions for scoring
    pub fn new(description1: impl Into<String>, description2: impl Into<String>) -> Self {
        Self {
            description1: description1.into(),
            description2: description2.into(),
        }
    }
}

/// Body of `POST /create_incident`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIncidentPayload {
    /// One-line summary
    pub short_description: String,
    /// Full problem description
    pub description: String,
    /// Ticket category
    pub category: String,
    /// Business impact
    pub impact: String,
    /// How soon it needs attention
    pub urgency: String,
    /// Client app version
    pub u_version: String,
    /// Session correlation id
    pub correlation_id: String,
    /// Page the report was filed from
    pub u_page: String,
    /// Detected operating system
    pub u_os: String,
    /// Detected browser
    pub u_browser: String,
    /// HTML snapshot taken at mount
    pub u_html_of_page: String,
    /// Session clickstream up to the create call
    pub u_clickstream_data: Vec<ClickstreamEvent>,
}

/// Success body of `POST /create_incident`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedIncident {
    /// Assigned incident number
    #[serde(default, deserialize_with = "null_as_empty")]
    pub number: String,
    /// Backend record id
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sys_id: String,
}

/// What the backend said about a create request that reached it
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// 2xx with the new record's identifiers
    Created(CreatedIncident),
    /// Non-2xx with whatever `details` the backend supplied
    Rejected {
        /// HTTP status code
        status: u16,
        /// `details` rendered as text, or `undefined` when absent
        details: String,
    },
}

/// Failure body of `POST /create_incident`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFailure {
    /// Backend explanation; any JSON shape
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Body of `PATCH /update_incident/{number}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateIncidentRequest {
    /// Replacement value for the related-issues column
    pub u_related_issues: String,
}

/// Response from `GET /api/example-data`
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleDataResponse {
    /// False when the data could not be loaded
    pub success: bool,
    /// Rows to display
    #[serde(default)]
    pub banks: Vec<Bank>,
    /// Failure reason when `success` is false
    #[serde(default)]
    pub error: Option<String>,
}

/// One row of the test view's banking data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    /// Institution name
    #[serde(default)]
    pub bank_name: String,
    /// Account number
    #[serde(default)]
    pub account_number: String,
    /// Routing number
    #[serde(default)]
    pub routing_number: String,
    /// IBAN
    #[serde(default)]
    pub iban: String,
    /// SWIFT/BIC code
    #[serde(default)]
    pub swift_bic: String,
}
