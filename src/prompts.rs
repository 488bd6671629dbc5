use crate::models::{GenerationRequest, LengthTier, RefinementRequest};

pub const CONTENT_BASE: &str = include_str!("../data/prompts/content_base.txt");
pub const LONG_FORM: &str = include_str!("../data/prompts/long_form.txt");
pub const CONTACT_HEADER: &str = include_str!("../data/prompts/contact_header.txt");
pub const FORMAT_DIRECTIVE: &str = include_str!("../data/prompts/format_directive.txt");
pub const REFINEMENT: &str = include_str!("../data/prompts/refinement.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Builds the full instruction string for a text generation request.
///
/// Blocks are appended in a fixed order: base template, the long-form
/// clause for the longest tier, the contact block when any field is
/// set, and always the formatting directive last.
pub fn content_prompt(request: &GenerationRequest) -> String {
    let mut blocks = vec![render(
        CONTENT_BASE.trim_end(),
        &[
            ("length", &request.length().to_string()),
            ("content_type", &request.content_type().to_string()),
            ("topic", request.topic()),
        ],
    )];

    if request.length() == LengthTier::Long {
        blocks.push(LONG_FORM.trim_end().to_string());
    }

    let contact = request.contact();
    if contact.has_any() {
        let mut lines = vec![CONTACT_HEADER.trim_end().to_string()];
        if !contact.phone.is_empty() {
            lines.push(format!("Phone Number: {}", contact.phone));
        }
        if !contact.email.is_empty() {
            lines.push(format!("Email: {}", contact.email));
        }
        if !contact.address.is_empty() {
            lines.push(format!("Address: {}", contact.address));
        }
        blocks.push(lines.join("\n"));
    }

    blocks.push(FORMAT_DIRECTIVE.trim_end().to_string());

    blocks.join("\n\n")
}

/// Builds the instruction string for refining already-generated text.
///
/// The prior text rides along with the instruction so the model has
/// something to rewrite; the original topic is not repeated.
pub fn refinement_prompt(request: &RefinementRequest) -> String {
    render(
        REFINEMENT.trim_end(),
        &[
            ("instruction", request.instruction()),
            ("content", request.content()),
        ],
    )
}
