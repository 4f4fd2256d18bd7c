//! Incident backend client and wire types.
//!
//! The backend fronts both the chat model and the incident table. The widget
//! talks to it through [`IncidentBackend`] so tests can substitute a mock.

mod client;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

pub use client::BackendClient;
pub use types::*;

use async_trait::async_trait;

use crate::error::BackendResult;

/// Operations the chat widget needs from the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncidentBackend: Send + Sync {
    /// Send the full transcript and return the assistant's reply text.
    async fn chat(&self, request: ChatRequest) -> BackendResult<String>;

    /// Fetch the most recent `limit` incidents.
    async fn recent_incidents(&self, limit: u32) -> BackendResult<Vec<IncidentRecord>>;

    /// Score two descriptions remotely.
    async fn compare_descriptions(&self, request: CompareRequest) -> BackendResult<f64>;

    /// Create an incident. A non-2xx reply is an `Ok(Rejected)`, not an error.
    async fn create_incident(&self, payload: CreateIncidentPayload) -> BackendResult<CreateOutcome>;

    /// Overwrite an incident's related-issues field.
    async fn update_incident(
        &self,
        number: String,
        request: UpdateIncidentRequest,
    ) -> BackendResult<()>;
}
