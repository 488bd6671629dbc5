use super::client::GeminiHttpClient;
use super::extract::{self, Extraction};
use super::types::PredictRequest;
use crate::ai::retry::RetryPolicy;
use crate::ai::ImageGenerationService;
use crate::models::ImagePayload;
use crate::Result;
use async_trait::async_trait;
use tracing::{info, warn};

/// Image generation backed by the Imagen `predict` endpoint.
///
/// Each request gets exactly one attempt; the retry schedule applies
/// to text generation only.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                RetryPolicy::single_attempt(),
                client,
            ),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    /// Requests one image for the prompt.
    ///
    /// A 2xx response without usable image data yields a placeholder
    /// payload, not an error.
    async fn generate_image(&self, prompt: &str) -> Result<ImagePayload> {
        info!("Generating image with {}", self.http.model());

        let request = PredictRequest::from_prompt(prompt);
        let body = self.http.predict(&request).await?;

        match extract::image_bytes_b64(&body) {
            Extraction::Present(data) => Ok(ImagePayload::from_base64_png(&data)),
            Extraction::Absent(field) => {
                warn!("Imagen response had no image data ({} missing)", field);
                Ok(ImagePayload::Placeholder)
            }
            Extraction::Malformed(reason) => {
                warn!("Imagen response was not the expected shape: {}", reason);
                Ok(ImagePayload::Placeholder)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use crate::Error;
    use wiremock::matchers::body_partial_json;
    use wiremock::{MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "imagen-3.0-generate-002";

    fn make_client(server: &MockServer) -> GeminiImageClient {
        GeminiImageClient::new("test-key".to_string(), DEFAULT_MODEL.to_string())
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_image_wraps_base64_payload() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .and(body_partial_json(serde_json::json!({
                "instances": { "prompt": "a sunset" },
                "parameters": { "sampleCount": 1 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": "aGVsbG8=" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server);

        let payload = client.generate_image("a sunset").await.unwrap();
        assert_eq!(
            payload.as_data_uri(),
            Some("data:image/png;base64,aGVsbG8=")
        );
    }

    #[tokio::test]
    async fn test_missing_predictions_yield_placeholder() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = make_client(&server);

        let payload = client.generate_image("a sunset").await.unwrap();
        assert!(payload.is_placeholder());
    }

    #[tokio::test]
    async fn test_unparseable_body_yields_placeholder() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = make_client(&server);

        let payload = client.generate_image("a sunset").await.unwrap();
        assert!(payload.is_placeholder());
    }

    #[tokio::test]
    async fn test_failed_request_gets_a_single_attempt() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server);

        let err = client.generate_image("a sunset").await.unwrap_err();
        assert!(matches!(err, Error::RequestFailed { status: 500 }));
    }
}
