//! Session orchestration for generation actions.
//!
//! Owns the interaction state machine: one action runs at a time, a
//! new generation replaces the prior result, and contact details are
//! loaded once at startup then written through on every change.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::ai::{
    GeminiImageClient, GeminiTextClient, ImageGenerationService, RetryPolicy, TextGenerationService,
};
use crate::models::{
    Config, ContactInfo, ContentType, GenerationRequest, GenerationResult, ImagePayload,
    InteractionState, LengthTier, RefinementRequest,
};
use crate::prompts;
use crate::storage::{ContactStore, FileContactStore};
use crate::{Error, Result};

pub const TEXT_TOPIC_REQUIRED: &str = "Please enter a prompt to generate content.";
pub const IMAGE_TOPIC_REQUIRED: &str = "Please enter a prompt to generate an image.";
pub const REFINE_REQUIREMENTS: &str =
    "Please generate content first and enter a refinement prompt.";
pub const IMAGE_FAILED_ALERT: &str = "Image generation failed. Please try again.";
pub const IMAGE_ERROR_ALERT: &str =
    "An error occurred during image generation. Please try again.";
pub const GENERATION_ERROR: &str =
    "An error occurred. Please check the logs for details or try again.";

/// Drives generation actions against injected services.
pub struct Session {
    text: Box<dyn TextGenerationService>,
    image: Box<dyn ImageGenerationService>,
    store: Box<dyn ContactStore>,
    contact: ContactInfo,
    content_type: ContentType,
    length: LengthTier,
    state: InteractionState,
    result: Option<GenerationResult>,
    alert: Option<String>,
}

/// Injectable service bundle used to construct [`Session`] in tests
/// and harnesses.
pub struct SessionServices {
    pub text: Box<dyn TextGenerationService>,
    pub image: Box<dyn ImageGenerationService>,
    pub store: Box<dyn ContactStore>,
}

impl Session {
    /// Build a session from concrete service dependencies.
    ///
    /// Saved contact details are loaded here; a store that cannot be
    /// read yields an empty contact rather than a failed startup.
    pub fn with_services(services: SessionServices) -> Self {
        let contact = services.store.load().unwrap_or_else(|e| {
            warn!("Could not load saved contact details: {}", e);
            ContactInfo::default()
        });

        Self {
            text: services.text,
            image: services.image,
            store: services.store,
            contact,
            content_type: ContentType::default(),
            length: LengthTier::default(),
            state: InteractionState::Idle,
            result: None,
            alert: None,
        }
    }

    /// Construct a session from environment configuration
    /// (`Config::from_env`), talking to the real Gemini endpoints.
    pub fn from_config(config: &Config) -> Result<Self> {
        info!(
            "Using text model {} and image model {}",
            config.text_model, config.image_model
        );

        // Reuse one HTTP connection pool across both clients.
        let http_client = reqwest::Client::new();
        let retry = RetryPolicy::new(
            config.retry_max_attempts,
            Duration::from_millis(config.retry_initial_delay_ms),
        );

        let text = GeminiTextClient::new_with_client(
            config.gemini_api_key.clone(),
            config.text_model.clone(),
            retry,
            http_client.clone(),
        );
        let image = GeminiImageClient::new_with_client(
            config.gemini_api_key.clone(),
            config.image_model.clone(),
            http_client,
        );
        let store = FileContactStore::at_default_location()?;

        Ok(Self::with_services(SessionServices {
            text: Box::new(text),
            image: Box::new(image),
            store: Box::new(store),
        }))
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// The current text result, if the last completed action produced
    /// one. Failure messages do not count as text.
    pub fn current_text(&self) -> Option<&str> {
        self.result.as_ref().and_then(|r| r.as_text())
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn length(&self) -> LengthTier {
        self.length
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.content_type = content_type;
    }

    pub fn set_length(&mut self, length: LengthTier) {
        self.length = length;
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.contact.phone = phone.to_string();
        self.persist_contact();
    }

    pub fn set_email(&mut self, email: &str) {
        self.contact.email = email.to_string();
        self.persist_contact();
    }

    pub fn set_address(&mut self, address: &str) {
        self.contact.address = address.to_string();
        self.persist_contact();
    }

    fn persist_contact(&self) {
        if let Err(e) = self.store.save(&self.contact) {
            warn!("Could not save contact details: {}", e);
        }
    }

    /// Accepts a generate-content trigger.
    ///
    /// Returns the validated request and enters `GeneratingText`, or
    /// `None` if the trigger was rejected. A rejected topic raises an
    /// alert; a trigger while busy is dropped silently.
    pub fn begin_text_generation(&mut self, topic: &str) -> Option<GenerationRequest> {
        if !self.state.is_idle() {
            warn!("Ignoring generate-content trigger while {:?}", self.state);
            return None;
        }

        let Ok(request) = GenerationRequest::new(
            topic,
            self.content_type,
            self.length,
            self.contact.clone(),
        ) else {
            self.alert = Some(TEXT_TOPIC_REQUIRED.to_string());
            return None;
        };

        self.result = None;
        self.state = InteractionState::GeneratingText;
        Some(request)
    }

    /// Accepts a generate-image trigger, returning the prompt to send.
    ///
    /// The image prompt is the bare topic; no template is applied.
    pub fn begin_image_generation(&mut self, topic: &str) -> Option<String> {
        if !self.state.is_idle() {
            warn!("Ignoring generate-image trigger while {:?}", self.state);
            return None;
        }

        let topic = topic.trim();
        if topic.is_empty() {
            self.alert = Some(IMAGE_TOPIC_REQUIRED.to_string());
            return None;
        }

        self.result = None;
        self.state = InteractionState::GeneratingImage;
        Some(topic.to_string())
    }

    /// Accepts a refine trigger.
    ///
    /// Requires a current text result and a non-empty instruction.
    /// The prior text stays visible until the refined result lands.
    pub fn begin_refinement(&mut self, instruction: &str) -> Option<RefinementRequest> {
        if !self.state.is_idle() {
            warn!("Ignoring refine trigger while {:?}", self.state);
            return None;
        }

        let content = match self.current_text() {
            Some(content) => content.to_string(),
            None => {
                self.alert = Some(REFINE_REQUIREMENTS.to_string());
                return None;
            }
        };

        let Ok(request) = RefinementRequest::new(instruction, &content) else {
            self.alert = Some(REFINE_REQUIREMENTS.to_string());
            return None;
        };

        self.state = InteractionState::Refining;
        Some(request)
    }

    /// Records the outcome of the in-flight action and returns to
    /// idle. A completion arriving while idle is dropped.
    pub fn finish(&mut self, result: GenerationResult) {
        if self.state.is_idle() {
            warn!("Ignoring completion while idle");
            return;
        }

        self.result = Some(result);
        self.state = InteractionState::Idle;
    }

    /// Runs the full generate-content action: validate, build the
    /// prompt, call the service, record the outcome.
    pub async fn generate_text(&mut self, topic: &str) {
        let Some(request) = self.begin_text_generation(topic) else {
            return;
        };
        let prompt = prompts::content_prompt(&request);

        let result = match self.text.generate_content(&prompt).await {
            Ok(text) => GenerationResult::Text(text),
            Err(e) => {
                error!("Error generating content: {}", e);
                GenerationResult::Failed(GENERATION_ERROR.to_string())
            }
        };
        self.finish(result);
    }

    /// Runs the full generate-image action.
    ///
    /// Image failures are soft: the result is always an image payload,
    /// with a placeholder plus an alert when no image came back.
    pub async fn generate_image(&mut self, topic: &str) {
        let Some(prompt) = self.begin_image_generation(topic) else {
            return;
        };

        let result = match self.image.generate_image(&prompt).await {
            Ok(payload) => {
                if payload.is_placeholder() {
                    self.alert = Some(IMAGE_FAILED_ALERT.to_string());
                }
                GenerationResult::Image(payload)
            }
            Err(Error::RequestFailed { status }) => {
                error!("Image generation failed with status {}", status);
                self.alert = Some(IMAGE_FAILED_ALERT.to_string());
                GenerationResult::Image(ImagePayload::Placeholder)
            }
            Err(e) => {
                error!("Error generating image: {}", e);
                self.alert = Some(IMAGE_ERROR_ALERT.to_string());
                GenerationResult::Image(ImagePayload::Placeholder)
            }
        };
        self.finish(result);
    }

    /// Runs the full refine action against the current text result.
    pub async fn refine(&mut self, instruction: &str) {
        let Some(request) = self.begin_refinement(instruction) else {
            return;
        };
        let prompt = prompts::refinement_prompt(&request);

        let result = match self.text.generate_content(&prompt).await {
            Ok(text) => GenerationResult::Text(text),
            Err(e) => {
                error!("Error refining content: {}", e);
                GenerationResult::Failed(GENERATION_ERROR.to_string())
            }
        };
        self.finish(result);
    }
}
