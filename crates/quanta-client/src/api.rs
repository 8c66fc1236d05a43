//! Quanta REST API client.
//!
//! Talks to the Quanta learning service: health probe, glossary, quiz
//! questions and circuit simulation. Successful payloads may arrive bare or
//! wrapped as `{"success": true, "data": ...}`; failures carry
//! `{"error": "..."}` with a non-2xx status.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use quanta_circuit::{SimulationRequest, SimulationResult};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::glossary::{GlossaryListing, GlossaryPayload};
use crate::quiz::{QuizLevel, QuizQuestion};

/// Longest error body echoed back in a message.
const MAX_ERROR_BODY: usize = 200;

/// Quanta REST API client.
#[derive(Debug, Clone)]
pub struct QuantaClient {
    client: Client,
    base_url: String,
}

impl QuantaClient {
    /// Create a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Service root all paths are joined to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe service liveness.
    #[instrument(skip(self))]
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        debug!("Checking health at {}", url);

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Fetch glossary terms, optionally asking the service for one page.
    #[instrument(skip(self))]
    pub async fn glossary(&self, paging: Option<(u32, u32)>) -> ClientResult<GlossaryListing> {
        let url = format!("{}/glossary", self.base_url);
        debug!("Fetching glossary from {}", url);

        let mut request = self.client.get(&url);
        if let Some((page, per_page)) = paging {
            request = request.query(&[("page", page), ("per_page", per_page)]);
        }

        let response = request.send().await?;
        let payload: GlossaryPayload = self.handle_response(response).await?;
        Ok(payload.into())
    }

    /// Fetch quiz questions for a difficulty level.
    #[instrument(skip(self))]
    pub async fn quiz(&self, level: QuizLevel) -> ClientResult<Vec<QuizQuestion>> {
        let url = format!("{}/quiz", self.base_url);
        debug!("Fetching {} quiz questions from {}", level, url);

        let response = self
            .client
            .get(&url)
            .query(&[("level", level.as_str())])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Submit a circuit for simulation.
    ///
    /// The returned counts are checked against the request's qubit count.
    #[instrument(skip(self, request), fields(qubits = request.qubits, gates = request.gates.len()))]
    pub async fn simulate(&self, request: &SimulationRequest) -> ClientResult<SimulationResult> {
        let url = format!("{}/simulate", self.base_url);
        debug!("Submitting circuit to {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let result: SimulationResult = self.handle_response(response).await?;

        result
            .check_shape(request.qubits)
            .map_err(ClientError::Malformed)?;
        Ok(result)
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!(status = status.as_u16(), %message, "service returned an error");
            return Err(ClientError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ClientError::Malformed(format!("invalid JSON: {e}")))?;
        let payload = unwrap_envelope(value)?;
        serde_json::from_value(payload).map_err(|e| ClientError::Malformed(e.to_string()))
    }
}

/// Strip a `{"success": ..., "data": ...}` wrapper if present.
fn unwrap_envelope(value: Value) -> ClientResult<Value> {
    match value {
        Value::Object(mut map) if map.contains_key("success") => {
            if map.get("success") == Some(&Value::Bool(false)) {
                let message = map
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("request was not successful")
                    .to_string();
                return Err(ClientError::Malformed(message));
            }
            map.remove("data")
                .ok_or_else(|| ClientError::Malformed("envelope has no data field".to_string()))
        }
        other => Ok(other),
    }
}

/// Best human-readable message from an error body.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = value.get(key).and_then(Value::as_str) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_BODY).collect()
    }
}

// ── Response types ────────────────────────────────────────────────────

/// `/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self.status.to_lowercase().as_str(), "ok" | "online" | "healthy")
    }
}
