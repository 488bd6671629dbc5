//! Request and response payload types for the `generateContent` and
//! `predict` endpoints.

use serde::{Deserialize, Serialize};

/// Single-turn `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Wraps one prompt string as a single text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// `generateContent` response envelope.
///
/// Every level is optional so an unexpected shape degrades to a
/// missing-content outcome instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Imagen `predict` request body.
///
/// `instances` is a single object, matching the REST shape these
/// models accept.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: PromptInstance,
    pub parameters: PredictParameters,
}

impl PredictRequest {
    /// A one-image request for the given prompt.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            instances: PromptInstance {
                prompt: prompt.to_string(),
            },
            parameters: PredictParameters { sample_count: 1 },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
}

/// `predict` response envelope, optional at every level like
/// [`GenerateContentResponse`].
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub predictions: Option<Vec<Prediction>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
}
