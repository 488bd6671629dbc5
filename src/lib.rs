//! ContentPro - AI-assisted marketing content generation
//!
//! Builds Burmese marketing copy and matching images from a topic via
//! Gemini's generateContent and Imagen predict APIs, with retrying
//! request execution and persisted contact details woven into the
//! generated content.

pub mod ai;
pub mod error;
pub mod models;
pub mod prompts;
pub mod session;
pub mod storage;

pub use error::{Error, Result};
