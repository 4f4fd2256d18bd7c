use serde_json::{Map, Value};

use crate::backend::CreateIncidentPayload;
use crate::session::SessionStore;

/// Placeholder for any field the assistant could not fill.
pub const NOT_AVAILABLE: &str = "N/A";

/// Ticket fields collected by the assistant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketDraft {
    /// One-line summary
    pub short_description: Option<String>,
    /// Full problem description; required for a completed draft
    pub description: Option<String>,
    /// Ticket category
    pub category: Option<String>,
    /// Business impact
    pub impact: Option<String>,
    /// How soon it needs attention
    pub urgency: Option<String>,
}

impl TicketDraft {
    /// Read the draft fields out of a parsed reply object.
    ///
    /// Non-string values are rendered as JSON text so a numeric `impact`
    /// still reaches the backend. `null`, `false` and zero count as missing.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |name: &str| match object.get(name) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            short_description: field("short_description"),
            description: field("description"),
            category: field("category"),
            impact: field("impact"),
            urgency: field("urgency"),
        }
    }

    /// The description, if the assistant supplied a non-blank one
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }

    /// Build the create body: draft fields with "N/A" defaults plus session context
    pub fn into_payload(self, session: &SessionStore) -> CreateIncidentPayload {
        let or_na = |v: Option<String>| {
            v.filter(|s| !s.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        let metadata = session.metadata();

        CreateIncidentPayload {
            short_description: or_na(self.short_description),
            description: or_na(self.description),
            category: or_na(self.category),
            impact: or_na(self.impact),
            urgency: or_na(self.urgency),
            u_version: metadata.version.clone(),
            correlation_id: session.correlation_id().to_string(),
            u_page: metadata.page.clone(),
            u_os: metadata.os.clone(),
            u_browser: metadata.browser.clone(),
            u_html_of_page: metadata.html_of_page.clone(),
            u_clickstream_data: session.clickstream().to_vec(),
        }
    }
}

/// Pull the JSON object that starts at the first `{` of an assistant reply.
///
/// Text after the object is ignored. Returns `None` when there is no brace or
/// what follows it is not a JSON object.
pub fn extract_json_object(reply: &str) -> Option<Map<String, Value>> {
    let start = reply.find('{')?;
    let mut stream = serde_json::Deserializer::from_str(&reply[start..]).into_iter::<Value>();

    match stream.next() {
        Some(Ok(Value::Object(object))) => Some(object),
        _ => None,
    }
}

/// A reply counts as a completed draft once it carries a non-blank description.
pub fn parse_ticket_draft(reply: &str) -> Option<TicketDraft> {
    let object = extract_json_object(reply)?;
    let draft = TicketDraft::from_object(&object);
    draft.description()?;
    Some(draft)
}
