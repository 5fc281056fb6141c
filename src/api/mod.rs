//! Pricing backend client
//!
//! Single-shot JSON request/response over HTTP. No retries; callers decide
//! how a failure is shown.

pub mod types;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

pub use types::{
    ChatEnvelope, ChatRequest, CompareRequest, CompareResponse, Health, Hospital, HospitalQuote,
    IntakeRequest, ProcedureQuote, SymptomAnalysis, SymptomRequest, WireResponse,
};

const CHAT_PATH: &str = "/api/chat";
const SYMPTOMS_PATH: &str = "/api/analyze-symptoms";
const COMPARE_PATH: &str = "/api/compare-hospitals";
const INTAKE_PATH: &str = "/api/initial-form";
const HEALTH_PATH: &str = "/api/health";

/// Operations the chat session needs from the backend
#[async_trait]
pub trait PricingApi: Send + Sync {
    /// Send a free-text chat message
    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatEnvelope>;

    /// Ask the backend to guess a condition from symptoms
    async fn analyze_symptoms(&self, request: &SymptomRequest) -> ApiResult<SymptomAnalysis>;

    /// Price procedures across hospitals in a city, cheapest first
    async fn compare_hospitals(&self, request: &CompareRequest) -> ApiResult<CompareResponse>;

    /// Submit the intake form
    async fn submit_intake(&self, request: &IntakeRequest) -> ApiResult<ChatEnvelope>;

    /// Backend liveness
    async fn health(&self) -> ApiResult<Health>;
}

/// HTTP implementation of [`PricingApi`]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::BaseUrl(base_url));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, R>(&self, path: &'static str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::read_json(path, response).await
    }

    async fn get<R: DeserializeOwned>(&self, path: &'static str) -> ApiResult<R> {
        debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        Self::read_json(path, response).await
    }

    async fn read_json<R: DeserializeOwned>(
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> ApiResult<R> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Backend errors come as {"error": "..."}; fall back to the raw body
            let message = serde_json::from_str::<types::ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

#[async_trait]
impl PricingApi for ApiClient {
    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatEnvelope> {
        self.post(CHAT_PATH, request).await
    }

    async fn analyze_symptoms(&self, request: &SymptomRequest) -> ApiResult<SymptomAnalysis> {
        self.post(SYMPTOMS_PATH, request).await
    }

    async fn compare_hospitals(&self, request: &CompareRequest) -> ApiResult<CompareResponse> {
        self.post(COMPARE_PATH, request).await
    }

    async fn submit_intake(&self, request: &IntakeRequest) -> ApiResult<ChatEnvelope> {
        self.post(INTAKE_PATH, request).await
    }

    async fn health(&self) -> ApiResult<Health> {
        self.get(HEALTH_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = ApiClient::new("http://localhost:5000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url(CHAT_PATH), "http://localhost:5000/api/chat");
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        let err = ApiClient::new("localhost:5000", None).err().unwrap();
        assert!(matches!(err, ApiError::BaseUrl(_)));
    }
}
