use super::client::GeminiHttpClient;
use super::extract::{self, Extraction, NO_CONTENT_FALLBACK};
use super::types::GenerateContentRequest;
use crate::ai::retry::RetryPolicy;
use crate::ai::TextGenerationService;
use crate::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// Text generation backed by Gemini's `generateContent` endpoint.
pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(
            api_key,
            model,
            RetryPolicy::default(),
            reqwest::Client::new(),
        )
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        retry: RetryPolicy,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, retry, client),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiTextClient);

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    /// Sends the prompt and returns the generated text.
    ///
    /// A response with no usable text is not an error; the fixed
    /// fallback message is returned instead.
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        info!("Generating content with {}", self.http.model());

        let request = GenerateContentRequest::from_prompt(prompt);
        let body = self.http.generate_content(&request).await?;

        match extract::generated_text(&body) {
            Extraction::Present(text) => Ok(text),
            Extraction::Absent(field) => {
                warn!("Gemini response had no generated text ({} missing)", field);
                Ok(NO_CONTENT_FALLBACK.to_string())
            }
            Extraction::Malformed(reason) => {
                warn!("Gemini response was not the expected shape: {}", reason);
                Ok(NO_CONTENT_FALLBACK.to_string())
            }
        }
    }
}
