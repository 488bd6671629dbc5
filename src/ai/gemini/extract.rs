//! Pulls generated payloads out of raw response bodies.
//!
//! Extraction never fails the request: a body that is missing the
//! expected content, or is not the expected shape at all, is reported
//! as an outcome the caller can degrade from.

use crate::ai::gemini::types::{GenerateContentResponse, PredictResponse};

/// Substituted for the generated text when a response carries none.
pub const NO_CONTENT_FALLBACK: &str =
    "No content was generated. Please try again with a different prompt.";

/// Outcome of probing a response body for a generated payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    /// The expected payload was present and non-empty.
    Present(T),
    /// The body parsed but the named field was missing or empty.
    Absent(&'static str),
    /// The body did not parse as the expected envelope.
    Malformed(String),
}

/// Extracts the generated text from a `generateContent` response
/// body, probing `candidates[0].content.parts[0].text`.
pub fn generated_text(body: &str) -> Extraction<String> {
    let response: GenerateContentResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => return Extraction::Malformed(e.to_string()),
    };

    let Some(candidates) = response.candidates else {
        return Extraction::Absent("candidates");
    };
    let Some(candidate) = candidates.into_iter().next() else {
        return Extraction::Absent("candidates[0]");
    };
    let Some(content) = candidate.content else {
        return Extraction::Absent("content");
    };
    let Some(parts) = content.parts else {
        return Extraction::Absent("parts");
    };
    let Some(part) = parts.into_iter().next() else {
        return Extraction::Absent("parts[0]");
    };
    let Some(text) = part.text else {
        return Extraction::Absent("text");
    };
    if text.is_empty() {
        return Extraction::Absent("text");
    }

    Extraction::Present(text)
}

/// Extracts the base64 image data from a `predict` response body,
/// probing `predictions[0].bytesBase64Encoded`.
pub fn image_bytes_b64(body: &str) -> Extraction<String> {
    let response: PredictResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => return Extraction::Malformed(e.to_string()),
    };

    let Some(predictions) = response.predictions else {
        return Extraction::Absent("predictions");
    };
    let Some(prediction) = predictions.into_iter().next() else {
        return Extraction::Absent("predictions[0]");
    };
    let Some(data) = prediction.bytes_base64_encoded else {
        return Extraction::Absent("bytesBase64Encoded");
    };
    if data.is_empty() {
        return Extraction::Absent("bytesBase64Encoded");
    }

    Extraction::Present(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response_returns_text_unmodified() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "  generated text, as-is \n" }]
                }
            }]
        })
        .to_string();

        assert_eq!(
            generated_text(&body),
            Extraction::Present("  generated text, as-is \n".to_string())
        );
    }

    #[test]
    fn test_missing_candidates_is_absent() {
        assert_eq!(generated_text("{}"), Extraction::Absent("candidates"));
    }

    #[test]
    fn test_empty_candidates_is_absent() {
        let body = serde_json::json!({ "candidates": [] }).to_string();
        assert_eq!(generated_text(&body), Extraction::Absent("candidates[0]"));
    }

    #[test]
    fn test_part_without_text_is_absent() {
        let body = serde_json::json!({
            "candidates": [{ "content": { "parts": [{}] } }]
        })
        .to_string();
        assert_eq!(generated_text(&body), Extraction::Absent("text"));
    }

    #[test]
    fn test_empty_text_is_absent() {
        let body = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
        })
        .to_string();
        assert_eq!(generated_text(&body), Extraction::Absent("text"));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            generated_text("<html>502 Bad Gateway</html>"),
            Extraction::Malformed(_)
        ));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let body = serde_json::json!({ "candidates": "unexpected" }).to_string();
        assert!(matches!(generated_text(&body), Extraction::Malformed(_)));
    }

    #[test]
    fn test_prediction_bytes_present() {
        let body = serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": "aGVsbG8=" }]
        })
        .to_string();

        assert_eq!(
            image_bytes_b64(&body),
            Extraction::Present("aGVsbG8=".to_string())
        );
    }

    #[test]
    fn test_missing_predictions_is_absent() {
        assert_eq!(image_bytes_b64("{}"), Extraction::Absent("predictions"));
    }

    #[test]
    fn test_empty_base64_is_absent() {
        let body = serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": "" }]
        })
        .to_string();
        assert_eq!(
            image_bytes_b64(&body),
            Extraction::Absent("bytesBase64Encoded")
        );
    }
}
