//! HTTP client for the prediction and chat service.
//!
//! One `ApiClient` is built at startup and cloned into each background task
//! (`reqwest::Client` is reference-counted internally, so clones share the
//! connection pool and the cookie jar). The cookie jar matters for `/chat`:
//! the service keys its conversation history on a session cookie.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::risk::RiskClass;
use crate::survey::Submission;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predicted_mood_class: i64,
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the service at `base_url` (e.g. `http://localhost:5001`).
    ///
    /// `timeout` bounds each whole request, connect through body.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Transport` if the TLS backend cannot initialise.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder().cookie_store(true).timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts the survey answers to `/predict_mood` and returns the risk class.
    pub async fn predict_mood(&self, submission: &Submission) -> Result<RiskClass, ServiceError> {
        let response = self.post("/predict_mood", submission).await?;
        let body: PredictResponse = decode(response).await?;
        Ok(RiskClass::try_from(body.predicted_mood_class)?)
    }

    /// Sends one chat message to `/chat` and returns the assistant's text.
    pub async fn chat(&self, message: &str) -> Result<String, ServiceError> {
        let response = self.post("/chat", &ChatBody { message }).await?;
        let body: ChatResponse = decode(response).await?;
        Ok(body.response)
    }

    /// Asks the service to forget the server-side conversation history.
    pub async fn reset_conversation(&self) -> Result<(), ServiceError> {
        let response = self.post("/reset", &serde_json::json!({})).await?;
        check_status(response).await.map(drop)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4().to_string();
        debug!(%request_id, %url, "POST");
        let response = self
            .http
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body)
            .send()
            .await
            .inspect_err(|e| warn!(%request_id, %url, error = %e, "request failed"))?;
        debug!(%request_id, status = response.status().as_u16(), "response");
        Ok(response)
    }
}

/// Passes 2xx responses through; turns anything else into `ServiceError::Status`.
async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if !text.trim().is_empty() => text.trim().to_owned(),
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    Err(ServiceError::Status { status: status.as_u16(), message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let response = check_status(response).await?;
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ServiceError::Decode(e.to_string()))
}
