use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::types::{
    Bank, ChatRequest, ChatResponse, CompareRequest, CompareResponse, CreateFailure,
    CreateIncidentPayload, CreateOutcome, CreatedIncident, ExampleDataResponse, IncidentRecord,
    UpdateIncidentRequest,
};
use super::IncidentBackend;
use crate::config::{BackendConfig, RequestConfig};
use crate::error::{BackendError, BackendResult};

/// Client for the incident wizard backend
///
/// Every call is a single attempt; failures are returned to the caller as-is.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    request_config: RequestConfig,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: &BackendConfig, request_config: RequestConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(BackendError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_config,
        })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the banking rows shown on the test view
    pub async fn example_data(&self) -> BackendResult<Vec<Bank>> {
        let url = format!("{}/api/example-data", self.base_url);
        let response = self.send(self.client.get(&url)).await?;
        let response = Self::ensure_success(response).await?;
        let body: ExampleDataResponse = Self::read_json(response, "example data").await?;

        if !body.success {
            return Err(BackendError::Reported {
                operation: "example-data".to_string(),
                message: body.error.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        Ok(body.banks)
    }

    /// `{base_url}/update_incident/{number}` with the number percent-encoded
    /// as a single path segment
    fn update_incident_url(&self, number: &str) -> BackendResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| BackendError::InvalidUrl {
            message: format!("{}: {}", self.base_url, e),
        })?;
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl {
                message: format!("{}: cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .push("update_incident")
            .push(number);
        Ok(url)
    }

    /// Send a prepared request, mapping transport errors
    async fn send(&self, request: reqwest::RequestBuilder) -> BackendResult<Response> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout {
                    timeout_ms: self.request_config.timeout_ms,
                }
            } else {
                BackendError::Http(e)
            }
        })
    }

    /// Reject non-2xx responses with their body as the message
    async fn ensure_success(response: Response) -> BackendResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error_body = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message: error_body,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> BackendResult<T> {
        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse {
                message: format!("Failed to parse {} response: {}", what, e),
            })
    }
}

#[async_trait]
impl IncidentBackend for BackendClient {
    async fn chat(&self, request: ChatRequest) -> BackendResult<String> {
        let url = format!("{}/api/chat", self.base_url);
        let start = Instant::now();

        debug!(messages = request.messages.len(), "Calling chat endpoint");

        let response = self
            .send(
                self.client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .json(&request),
            )
            .await?;

        // The chat endpoint reports model failures in the body, often with a 5xx status.
        let status = response.status();
        let body: ChatResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                return Err(BackendError::InvalidResponse {
                    message: format!("Failed to parse chat response: {}", e),
                })
            }
            Err(_) => {
                return Err(BackendError::Api {
                    status: status.as_u16(),
                    message: "chat endpoint returned an unreadable error".to_string(),
                })
            }
        };

        if !body.success {
            let message = body.error.unwrap_or_else(|| "Model error".to_string());
            error!(
                status = status.as_u16(),
                error = %message,
                "Chat endpoint reported failure"
            );
            return Err(BackendError::Reported {
                operation: "chat".to_string(),
                message,
            });
        }

        let reply = body.reply.ok_or_else(|| BackendError::InvalidResponse {
            message: "chat response is missing 'reply'".to_string(),
        })?;

        info!(
            latency_ms = start.elapsed().as_millis(),
            reply_len = reply.len(),
            "Chat reply received"
        );

        Ok(reply)
    }

    async fn recent_incidents(&self, limit: u32) -> BackendResult<Vec<IncidentRecord>> {
        let url = format!("{}/incidents", self.base_url);

        let response = self
            .send(
                self.client
                    .get(&url)
                    .query(&[("limit", limit)])
                    .header("Accept", "application/json"),
            )
            .await?;
        let response = Self::ensure_success(response).await?;
        let incidents: Vec<IncidentRecord> = Self::read_json(response, "incidents").await?;

        debug!(limit, fetched = incidents.len(), "Fetched recent incidents");

        Ok(incidents)
    }

    async fn compare_descriptions(&self, request: CompareRequest) -> BackendResult<f64> {
        let url = format!("{}/compare_descriptions", self.base_url);

        let response = self
            .send(
                self.client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .json(&request),
            )
            .await?;
        let response = Self::ensure_success(response).await?;
        let body: CompareResponse = Self::read_json(response, "compare").await?;

        if !body.success {
            return Err(BackendError::Reported {
                operation: "compare_descriptions".to_string(),
                message: body
                    .error
                    .unwrap_or_else(|| "Similarity check failed".to_string()),
            });
        }

        body.similarity.ok_or_else(|| BackendError::InvalidResponse {
            message: "compare response is missing 'similarity'".to_string(),
        })
    }

    async fn create_incident(&self, payload: CreateIncidentPayload) -> BackendResult<CreateOutcome> {
        let url = format!("{}/create_incident", self.base_url);

        info!(
            correlation_id = %payload.correlation_id,
            category = %payload.category,
            "Creating incident"
        );

        let response = self
            .send(
                self.client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .json(&payload),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            let created: CreatedIncident = Self::read_json(response, "create incident").await?;
            info!(number = %created.number, sys_id = %created.sys_id, "Incident created");
            return Ok(CreateOutcome::Created(created));
        }

        let failure: CreateFailure = response.json().await.unwrap_or_default();
        let details = match failure.details {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => "undefined".to_string(),
        };
        error!(status = status.as_u16(), details = %details, "Incident creation rejected");

        Ok(CreateOutcome::Rejected {
            status: status.as_u16(),
            details,
        })
    }

    async fn update_incident(
        &self,
        number: String,
        request: UpdateIncidentRequest,
    ) -> BackendResult<()> {
        let url = self.update_incident_url(&number)?;

        let response = self
            .send(
                self.client
                    .patch(url)
                    .header("Content-Type", "application/json")
                    .json(&request),
            )
            .await?;
        Self::ensure_success(response).await?;

        info!(number = %number, "Incident related issues updated");
        Ok(())
    }
}
