use super::{ImageGenerationService, TextGenerationService};
use crate::models::ImagePayload;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum TextReply {
    Text(String),
    Fail(u16),
}

#[derive(Clone)]
enum ImageReply {
    Payload(ImagePayload),
    Fail(u16),
    Transport,
}

/// Scripted stand-in for [`TextGenerationService`].
///
/// Clones share state, so tests can keep a handle after boxing one
/// into a session.
#[derive(Clone)]
pub struct MockTextClient {
    replies: Arc<Mutex<Vec<TextReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a successful reply. Replies cycle when more calls arrive
    /// than were queued.
    pub fn with_response(self, response: String) -> Self {
        self.replies.lock().unwrap().push(TextReply::Text(response));
        self
    }

    /// Queue a failed-request reply carrying the given status.
    pub fn with_failure(self, status: u16) -> Self {
        self.replies.lock().unwrap().push(TextReply::Fail(status));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok("Mock generated content".to_string());
        }

        let index = (*count - 1) % replies.len();
        match &replies[index] {
            TextReply::Text(text) => Ok(text.clone()),
            TextReply::Fail(status) => Err(Error::RequestFailed { status: *status }),
        }
    }
}

/// Scripted stand-in for [`ImageGenerationService`].
#[derive(Clone)]
pub struct MockImageClient {
    replies: Arc<Mutex<Vec<ImageReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_payload(self, payload: ImagePayload) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(ImageReply::Payload(payload));
        self
    }

    /// Queue a reply with no usable image data.
    pub fn with_placeholder(self) -> Self {
        self.with_payload(ImagePayload::Placeholder)
    }

    /// Queue a failed-request reply carrying the given status.
    pub fn with_failure(self, status: u16) -> Self {
        self.replies.lock().unwrap().push(ImageReply::Fail(status));
        self
    }

    /// Queue a reply that errors before any response is received.
    pub fn with_transport_failure(self) -> Self {
        self.replies.lock().unwrap().push(ImageReply::Transport);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<ImagePayload> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(ImagePayload::from_base64_png("AAAA"));
        }

        let index = (*count - 1) % replies.len();
        match &replies[index] {
            ImageReply::Payload(payload) => Ok(payload.clone()),
            ImageReply::Fail(status) => Err(Error::RequestFailed { status: *status }),
            ImageReply::Transport => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "mock transport failure",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_text_client_cycles_responses() {
        let client = MockTextClient::new()
            .with_response("first".to_string())
            .with_response("second".to_string());

        assert_eq!(client.generate_content("p").await.unwrap(), "first");
        assert_eq!(client.generate_content("p").await.unwrap(), "second");
        assert_eq!(client.generate_content("p").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_text_client_failure_reply() {
        let client = MockTextClient::new().with_failure(500);

        let err = client.generate_content("p").await.unwrap_err();
        assert!(matches!(err, Error::RequestFailed { status: 500 }));
    }

    #[tokio::test]
    async fn test_mock_text_client_captures_prompts() {
        let client = MockTextClient::new();

        assert_eq!(client.get_call_count(), 0);
        client.generate_content("first prompt").await.unwrap();
        client.generate_content("second prompt").await.unwrap();

        assert_eq!(client.get_call_count(), 2);
        assert_eq!(client.prompts(), vec!["first prompt", "second prompt"]);
        assert_eq!(client.last_prompt().as_deref(), Some("second prompt"));
    }

    #[tokio::test]
    async fn test_mock_image_client_default_is_real_payload() {
        let client = MockImageClient::new();

        let payload = client.generate_image("a sunset").await.unwrap();
        assert!(!payload.is_placeholder());
        assert_eq!(client.last_prompt().as_deref(), Some("a sunset"));
    }

    #[tokio::test]
    async fn test_mock_image_client_scripted_replies() {
        let client = MockImageClient::new()
            .with_placeholder()
            .with_failure(429)
            .with_transport_failure();

        assert!(client
            .generate_image("p")
            .await
            .unwrap()
            .is_placeholder());
        assert!(matches!(
            client.generate_image("p").await.unwrap_err(),
            Error::RequestFailed { status: 429 }
        ));
        assert!(matches!(
            client.generate_image("p").await.unwrap_err(),
            Error::Io(_)
        ));
    }
}
