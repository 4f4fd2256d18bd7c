//! # Incident Wizard
//!
//! Conversational incident intake. A chat widget interviews the user through
//! an LLM-backed endpoint until the model replies with the ticket fields as
//! JSON, then checks recent incidents for a duplicate and either links the
//! report to the existing incident or opens a new one.
//!
//! ## Architecture
//!
//! ```text
//! Terminal / UI → ChatWidget → Incident backend (HTTP)
//!                    ↓            ├─ /api/chat
//!              SessionStore       ├─ /incidents, /compare_descriptions
//!                                 └─ /create_incident, /update_incident/{n}
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use incident_wizard::{BackendClient, ChatWidget, Config, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let backend = BackendClient::new(&config.backend, config.request.clone())?;
//!     let session = SessionStore::new(&config.client.version, &config.client.page_url);
//!     let mut widget = ChatWidget::new(backend, config.wizard.clone(), session);
//!     widget.mount(&config.client.user_agent, "");
//!     widget.toggle();
//!     if let Some(reply) = widget.send("My VPN keeps dropping").await {
//!         println!("{}", reply.content);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Mock login gate.
pub mod auth;
/// Incident backend client and wire types.
pub mod backend;
/// Configuration management.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// System prompt for the wizard conversation.
pub mod prompts;
/// Path routing for the views.
pub mod router;
/// Per-session correlation id, metadata, and clickstream.
pub mod session;
/// Layout frame and view rendering.
pub mod shell;
/// Chat widget, reply parsing, and duplicate detection.
pub mod wizard;

pub use backend::{BackendClient, IncidentBackend};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::SessionStore;
pub use wizard::ChatWidget;
