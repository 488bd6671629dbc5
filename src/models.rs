//! Data models and structures
//!
//! Defines the core data structures for generation requests, results,
//! contact information, and runtime configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ai::retry::{DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_ATTEMPTS};

/// Default text generation model.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Default image generation model.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// The kind of content a generation request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    General,
    BlogPost,
    Email,
    #[default]
    SocialMediaPost,
    ProductDescription,
    Article,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::General,
        ContentType::BlogPost,
        ContentType::Email,
        ContentType::SocialMediaPost,
        ContentType::ProductDescription,
        ContentType::Article,
    ];
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentType::General => "General",
            ContentType::BlogPost => "Blog Post",
            ContentType::Email => "Email",
            ContentType::SocialMediaPost => "Social Media Post",
            ContentType::ProductDescription => "Product Description",
            ContentType::Article => "Article",
        };
        f.write_str(label)
    }
}

/// How long the generated content should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthTier {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthTier {
    pub const ALL: [LengthTier; 3] = [LengthTier::Short, LengthTier::Medium, LengthTier::Long];
}

impl fmt::Display for LengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LengthTier::Short => "Short",
            LengthTier::Medium => "Medium",
            LengthTier::Long => "Long",
        };
        f.write_str(label)
    }
}

/// Contact details woven into generated content when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl ContactInfo {
    /// Whether at least one contact field has been filled in.
    pub fn has_any(&self) -> bool {
        !self.phone.is_empty() || !self.email.is_empty() || !self.address.is_empty()
    }
}

/// A validated request for text generation.
///
/// The topic is trimmed on construction and guaranteed non-empty.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    topic: String,
    content_type: ContentType,
    length: LengthTier,
    contact: ContactInfo,
}

impl GenerationRequest {
    pub fn new(
        topic: &str,
        content_type: ContentType,
        length: LengthTier,
        contact: ContactInfo,
    ) -> crate::Result<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(crate::Error::Validation(
                "Topic must not be empty".to_string(),
            ));
        }

        Ok(Self {
            topic: topic.to_string(),
            content_type,
            length,
            contact,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn length(&self) -> LengthTier {
        self.length
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }
}

/// A validated request to refine previously generated content.
#[derive(Debug, Clone)]
pub struct RefinementRequest {
    instruction: String,
    content: String,
}

impl RefinementRequest {
    pub fn new(instruction: &str, content: &str) -> crate::Result<Self> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(crate::Error::Validation(
                "Refinement instruction must not be empty".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(crate::Error::Validation(
                "No content available to refine".to_string(),
            ));
        }

        Ok(Self {
            instruction: instruction.to_string(),
            content: content.to_string(),
        })
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A generated image, either real bytes or a stand-in when the
/// provider returned nothing usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// A `data:image/png;base64,` URI ready for display.
    DataUri(String),
    /// The provider produced no image data.
    Placeholder,
}

impl ImagePayload {
    /// Wraps raw base64 PNG data in a displayable data URI.
    pub fn from_base64_png(data: &str) -> Self {
        ImagePayload::DataUri(format!("{}{}", PNG_DATA_URI_PREFIX, data))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImagePayload::Placeholder)
    }

    pub fn as_data_uri(&self) -> Option<&str> {
        match self {
            ImagePayload::DataUri(uri) => Some(uri),
            ImagePayload::Placeholder => None,
        }
    }

    /// The raw base64 data without the data URI prefix.
    pub fn base64_data(&self) -> Option<&str> {
        self.as_data_uri()
            .map(|uri| uri.strip_prefix(PNG_DATA_URI_PREFIX).unwrap_or(uri))
    }
}

/// The outcome of a completed generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Text(String),
    Image(ImagePayload),
    Failed(String),
}

impl GenerationResult {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GenerationResult::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImagePayload> {
        match self {
            GenerationResult::Image(payload) => Some(payload),
            _ => None,
        }
    }
}

/// What the session is currently doing.
///
/// At most one generation runs at a time; new work is only accepted
/// while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    GeneratingText,
    GeneratingImage,
    Refining,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// Runtime configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub retry_max_attempts: u32,
    pub retry_initial_delay_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables, reading a
    /// `.env` file first if one exists.
    ///
    /// `GEMINI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| crate::Error::Config("GEMINI_API_KEY not set".to_string()))?;

        Ok(Self {
            gemini_api_key,
            text_model: std::env::var("CONTENTPRO_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            image_model: std::env::var("CONTENTPRO_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            retry_max_attempts: parse_env_var(
                "CONTENTPRO_RETRY_MAX_ATTEMPTS",
                DEFAULT_MAX_ATTEMPTS,
            )?,
            retry_initial_delay_ms: parse_env_var(
                "CONTENTPRO_RETRY_INITIAL_DELAY_MS",
                DEFAULT_INITIAL_DELAY_MS,
            )?,
        })
    }
}

fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> crate::Result<T> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| crate::Error::Config(format!("Invalid value for {}: {}", name, value))),
        Err(_) => Ok(default),
    }
}
