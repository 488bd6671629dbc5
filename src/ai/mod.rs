//! AI service integration for text and image generation
//!
//! Provides interfaces to Gemini's generateContent and Imagen predict
//! APIs for generating marketing content and matching images.

pub mod gemini;
pub mod mock;
pub mod retry;

pub use gemini::{GeminiImageClient, GeminiTextClient};
pub use mock::{MockImageClient, MockTextClient};
pub use retry::RetryPolicy;

use crate::models::ImagePayload;
use crate::Result;
use async_trait::async_trait;

/// Generates text for a fully built prompt string.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String>;
}

/// Generates an image for a prompt.
///
/// A response without usable image data yields a placeholder payload;
/// errors are reserved for failed or unsendable requests.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<ImagePayload>;
}
