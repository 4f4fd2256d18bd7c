//! Per-session state shared by the widget and the views.
//!
//! Holds the correlation id, client metadata, and the clickstream log. All
//! updates go through `&mut self`, so they are applied in call order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// One UI interaction, serialized flat as `{ts, event, ...details}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickstreamEvent {
    /// When the event happened.
    pub ts: DateTime<Utc>,
    /// Event name, e.g. `chat_opened`.
    pub event: String,
    /// Free-form extra fields.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ClickstreamEvent {
    /// Create an event stamped now with no details
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            event: event.into(),
            details: Map::new(),
        }
    }

    /// Attach a detail field
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Facts about the client reported alongside every incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// App version
    pub version: String,
    /// Page URL
    pub page: String,
    /// Operating system family
    pub os: String,
    /// Browser family
    pub browser: String,
    /// HTML snapshot of the page
    pub html_of_page: String,
}

/// A partial metadata update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MetadataUpdate {
    /// New app version
    pub version: Option<String>,
    /// New page URL
    pub page: Option<String>,
    /// New operating system
    pub os: Option<String>,
    /// New browser
    pub browser: Option<String>,
    /// New HTML snapshot
    pub html_of_page: Option<String>,
}

impl MetadataUpdate {
    /// Update only the platform fields
    pub fn platform(platform: Platform) -> Self {
        Self {
            os: Some(platform.os.to_string()),
            browser: Some(platform.browser.to_string()),
            ..Self::default()
        }
    }

    /// Update only the page snapshot
    pub fn html_of_page(html: impl Into<String>) -> Self {
        Self {
            html_of_page: Some(html.into()),
            ..Self::default()
        }
    }
}

/// Session store: correlation id, metadata, and clickstream.
#[derive(Debug, Clone)]
pub struct SessionStore {
    correlation_id: String,
    metadata: SessionMetadata,
    clickstream: Vec<ClickstreamEvent>,
    initial_metadata: SessionMetadata,
}

impl SessionStore {
    /// Create an empty store for a client at `page` running `version`
    pub fn new(version: impl Into<String>, page: impl Into<String>) -> Self {
        let metadata = SessionMetadata {
            version: version.into(),
            page: page.into(),
            os: "Unknown".to_string(),
            browser: "Unknown".to_string(),
            html_of_page: String::new(),
        };
        Self {
            correlation_id: String::new(),
            metadata: metadata.clone(),
            clickstream: Vec::new(),
            initial_metadata: metadata,
        }
    }

    /// Current correlation id (empty until set)
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Current metadata
    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    /// Events logged so far, oldest first
    pub fn clickstream(&self) -> &[ClickstreamEvent] {
        &self.clickstream
    }

    /// Replace the correlation id
    pub fn set_correlation_id(&mut self, id: impl Into<String>) {
        self.correlation_id = id.into();
    }

    /// Merge the provided fields into the metadata
    pub fn merge_metadata(&mut self, update: MetadataUpdate) {
        let MetadataUpdate {
            version,
            page,
            os,
            browser,
            html_of_page,
        } = update;

        if let Some(v) = version {
            self.metadata.version = v;
        }
        if let Some(v) = page {
            self.metadata.page = v;
        }
        if let Some(v) = os {
            self.metadata.os = v;
        }
        if let Some(v) = browser {
            self.metadata.browser = v;
        }
        if let Some(v) = html_of_page {
            self.metadata.html_of_page = v;
        }
    }

    /// Append an event to the clickstream
    pub fn record(&mut self, event: ClickstreamEvent) {
        debug!(event = %event.event, "Clickstream event");
        self.clickstream.push(event);
    }

    /// Shorthand for recording a detail-free event
    pub fn log_event(&mut self, name: &str) {
        self.record(ClickstreamEvent::new(name));
    }

    /// Return to the freshly created state
    pub fn reset(&mut self) {
        self.correlation_id.clear();
        self.metadata = self.initial_metadata.clone();
        self.clickstream.clear();
    }
}

/// Operating system and browser families derived from a user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// `Windows`, `macOS`, `Linux` or `Unknown`
    pub os: &'static str,
    /// `Chrome`, `Firefox`, `Edge`, `Safari` or `Unknown`
    pub browser: &'static str,
}

/// Classify a user agent string by substring.
///
/// Chrome is checked before Edge, so Chromium Edge reports as Chrome.
pub fn detect_platform(user_agent: &str) -> Platform {
    let os = if user_agent.contains("Win") {
        "Windows"
    } else if user_agent.contains("Mac") {
        "macOS"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else {
        "Unknown"
    };

    let browser = if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Edg") {
        "Edge"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "Unknown"
    };

    Platform { os, browser }
}
