//! Type conversions between aitutor and Gemini formats.

use crate::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use aitutor_core::{
    BackendOutput, FieldKind, FieldSpec, InvocationRequest, Modality, ResponseSchema,
    TemplateConfig,
};
use serde_json::{Map, Value, json};

const JSON_MIME_TYPE: &str = "application/json";

/// Text replayed for a turn that carried none, such as a generated image.
/// Gemini rejects empty text parts.
pub const EMPTY_TURN_TEXT: &str = "[generated image]";

/// Converts a response schema to Gemini's OpenAPI subset.
///
/// Returns `None` for shapes that are not requested as JSON.
pub fn response_schema(schema: &ResponseSchema) -> Option<Value> {
    match schema {
        ResponseSchema::Object(fields) => Some(object_schema(fields)),
        ResponseSchema::Array(fields) => Some(json!({
            "type": "ARRAY",
            "items": object_schema(fields),
        })),
        ResponseSchema::Text | ResponseSchema::Image => None,
    }
}

fn object_schema(fields: &[FieldSpec]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|field| (field.name().clone(), field_schema(field.kind())))
        .collect();
    let required: Vec<&str> = fields.iter().map(|field| field.name().as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn field_schema(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::String => json!({ "type": "STRING" }),
        FieldKind::OneOf(values) => json!({
            "type": "STRING",
            "format": "enum",
            "enum": values,
        }),
        FieldKind::StringList => json!({
            "type": "ARRAY",
            "items": { "type": "STRING" },
        }),
    }
}

/// Builds the generation parameters for a template.
pub fn generation_config(config: &TemplateConfig) -> GenerationConfig {
    let schema = config.schema();
    GenerationConfig {
        max_output_tokens: *config.max_output_tokens(),
        temperature: *config.temperature(),
        response_mime_type: schema.expects_json().then(|| JSON_MIME_TYPE.to_string()),
        response_schema: response_schema(schema),
        response_modalities: config
            .is_image()
            .then(|| vec!["TEXT".to_string(), "IMAGE".to_string()]),
    }
}

/// Converts an invocation into a `generateContent` request body.
///
/// History turns come first, in order, followed by one user turn with the
/// prompt and a file part per attachment.
pub fn to_generate_request(
    request: &InvocationRequest,
    config: &TemplateConfig,
) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history()
        .iter()
        .map(|turn| Content::with_role(turn.role().to_string(), vec![history_part(turn.text())]))
        .collect();

    let mut parts = vec![Part::text(request.prompt())];
    parts.extend(
        request
            .attachments()
            .iter()
            .map(|attachment| Part::file(attachment.uri(), attachment.mime_type())),
    );
    contents.push(Content::with_role("user", parts));

    GenerateContentRequest {
        contents,
        system_instruction: config.system_instruction().as_deref().map(Content::text),
        generation_config: Some(generation_config(config)),
    }
}

fn history_part(text: &str) -> Part {
    if text.trim().is_empty() {
        Part::text(EMPTY_TURN_TEXT)
    } else {
        Part::text(text)
    }
}

/// Extracts the normalized output from a response.
///
/// Image modality keeps only inline binary parts (the last one wins) and
/// discards text. Text modality joins the text parts and trims the result.
pub fn to_backend_output(response: &GenerateContentResponse, modality: Modality) -> BackendOutput {
    let parts = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| content.parts.as_slice())
        .unwrap_or_default();

    match modality {
        Modality::TextAndImage => {
            let image = parts
                .iter()
                .filter_map(|part| part.inline_data.as_ref())
                .filter(|inline| !inline.data.is_empty())
                .last()
                .map(|inline| inline.data.clone())
                .unwrap_or_default();
            BackendOutput::new(String::new(), image)
        }
        Modality::Text => {
            let text: String = parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect();
            BackendOutput::text_only(text.trim())
        }
    }
}
