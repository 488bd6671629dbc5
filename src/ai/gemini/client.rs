use crate::ai::retry::RetryPolicy;
use crate::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use tokio_retry::RetryIf;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Lightweight Gemini REST client shared by the text and image
/// modules.
///
/// Requests that come back non-2xx are re-sent per the retry policy.
/// Transport failures are not retried.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example
    /// `gemini-2.5-flash-preview-05-20`), not a `models/...`-prefixed
    /// path segment.
    pub fn new(api_key: String, model: String, retry: RetryPolicy) -> Self {
        Self::new_with_client(api_key, model, retry, Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        retry: RetryPolicy,
        client: Client,
    ) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn post_once<Req: Serialize>(&self, url: &str, request: &Req) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::RequestFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    async fn post_with_retry<Req: Serialize>(&self, url: String, request: &Req) -> Result<String> {
        RetryIf::spawn(
            self.retry.backoff(),
            || self.post_once(&url, request),
            |err: &Error| err.is_retryable(),
        )
        .await
        .map_err(|e| {
            tracing::error!("Gemini request failed: {}", e);
            e
        })
    }

    /// Calls Gemini's `generateContent` endpoint and returns the raw
    /// response body.
    pub async fn generate_content<Req: Serialize>(&self, request: &Req) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        self.post_with_retry(url, request).await
    }

    /// Calls the `predict` endpoint used by the Imagen models and
    /// returns the raw response body.
    pub async fn predict<Req: Serialize>(&self, request: &Req) -> Result<String> {
        let url = format!("{}/v1beta/models/{}:predict", self.base_url, self.model);
        self.post_with_retry(url, request).await
    }
}
