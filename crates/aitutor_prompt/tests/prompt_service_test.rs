use aitutor_core::{
    AttachmentHandle, BackendOutput, Exchange, InvocationRequest, PromptRequest, Role, Template,
    TemplateRegistry,
};
use aitutor_error::{AitutorResult, GeminiError, GeminiErrorKind, PromptErrorKind};
use aitutor_interface::{FileUploader, GenerativeBackend};
use aitutor_prompt::{AttachmentResolver, PromptService};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock backend that returns a canned output and records every invocation.
struct MockBackend {
    output: BackendOutput,
    calls: AtomicUsize,
    requests: Mutex<Vec<InvocationRequest>>,
}

impl MockBackend {
    fn new(output: BackendOutput) -> Arc<Self> {
        Arc::new(Self {
            output,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> InvocationRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("backend was invoked")
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn invoke(&self, request: &InvocationRequest) -> BackendOutput {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.output.clone()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model-v1"
    }
}

/// Mock uploader that rejects any URL containing "invalid".
#[derive(Default)]
struct MockUploader {
    calls: AtomicUsize,
}

impl MockUploader {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileUploader for MockUploader {
    async fn upload(&self, url: &str) -> AitutorResult<AttachmentHandle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("invalid") {
            return Err(GeminiError::new(GeminiErrorKind::AttachmentUpload {
                url: url.to_string(),
                message: "rejected".to_string(),
            })
            .into());
        }
        Ok(AttachmentHandle::new(
            format!("files/{}", url.rsplit('/').next().unwrap_or(url)),
            "image/png",
        ))
    }
}

fn service(
    backend: &Arc<MockBackend>,
    uploader: &Arc<MockUploader>,
) -> PromptService<Arc<MockBackend>, Arc<MockUploader>> {
    PromptService::new(
        backend.clone(),
        uploader.clone(),
        Arc::new(TemplateRegistry::builtin()),
    )
}

fn request(input: &str, template: Template) -> PromptRequest {
    PromptRequest::builder()
        .user_input(Some(input.to_string()))
        .template(Some(template))
        .build()
        .expect("valid request")
}

#[tokio::test]
async fn test_missing_input_is_rejected_before_any_call() {
    let backend = MockBackend::new(BackendOutput::text_only("unused"));
    let uploader = MockUploader::new();
    let service = service(&backend, &uploader);

    for input in [None, Some(String::new()), Some("   \n\t".to_string())] {
        let request = PromptRequest::builder()
            .user_input(input)
            .attachment_urls(vec!["https://example.com/a.png".to_string()])
            .build()
            .unwrap();

        let err = service
            .generate_response(&request)
            .await
            .expect_err("empty input must be rejected");
        assert_eq!(err.kind, PromptErrorKind::EmptyInput);
    }

    assert_eq!(backend.calls(), 0);
    assert_eq!(uploader.calls(), 0);
}

#[tokio::test]
async fn test_tutor_template_returns_parsed_json() {
    let backend = MockBackend::new(BackendOutput::text_only(
        r#"{"response":"Photosynthesis is..."}"#,
    ));
    let uploader = MockUploader::new();

    let result = service(&backend, &uploader)
        .generate_response(&request("What is photosynthesis?", Template::Tutor))
        .await
        .unwrap();

    assert_eq!(
        result.response(),
        &json!({"response": "Photosynthesis is..."})
    );
    assert_eq!(result.image(), "");
    assert_eq!(backend.calls(), 1);
    assert_eq!(*backend.last_request().template(), Template::Tutor);
    assert_eq!(backend.last_request().prompt(), "What is photosynthesis?");
}

#[tokio::test]
async fn test_malformed_json_gives_error_marker() {
    let backend = MockBackend::new(BackendOutput::text_only("not json"));
    let uploader = MockUploader::new();

    let result = service(&backend, &uploader)
        .generate_response(&request("Quiz me on fractions", Template::MultipleChoiceQuestion))
        .await
        .unwrap();

    assert!(result.is_error());
    assert_eq!(
        result.response(),
        &json!({"error": "Failed to generate response"})
    );
}

#[tokio::test]
async fn test_empty_backend_output_gives_error_marker() {
    let backend = MockBackend::new(BackendOutput::empty());
    let uploader = MockUploader::new();

    let result = service(&backend, &uploader)
        .generate_response(&PromptRequest::new("Hello"))
        .await
        .unwrap();

    assert!(result.is_error());
    assert_eq!(result.image(), "");
}

#[tokio::test]
async fn test_image_template_returns_image_and_ignores_text() {
    let backend = MockBackend::new(BackendOutput::new("", "iVBORw0KGgoAAAANSUhEUg=="));
    let uploader = MockUploader::new();

    let result = service(&backend, &uploader)
        .generate_response(&request("Draw a volcano", Template::GenerateImage))
        .await
        .unwrap();

    assert!(!result.is_error());
    assert_eq!(result.image(), "iVBORw0KGgoAAAANSUhEUg==");
    assert_eq!(result.response(), &Value::Null);
}

#[tokio::test]
async fn test_title_template_validates_fields() {
    let backend = MockBackend::new(BackendOutput::text_only(
        r#"{"name":"Fractions 101","topic":"math"}"#,
    ));
    let uploader = MockUploader::new();

    let result = service(&backend, &uploader)
        .generate_response(&request("How do I add fractions?", Template::GenerateTitle))
        .await
        .unwrap();

    assert_eq!(result.response()["topic"], "math");
}

#[tokio::test]
async fn test_title_outside_topic_set_is_rejected() {
    let backend = MockBackend::new(BackendOutput::text_only(
        r#"{"name":"Cooking","topic":"culinary"}"#,
    ));
    let uploader = MockUploader::new();

    let result = service(&backend, &uploader)
        .generate_response(&request("Teach me to cook", Template::GenerateTitle))
        .await
        .unwrap();

    assert!(result.is_error());
}

#[tokio::test]
async fn test_failed_attachment_is_dropped() {
    let backend = MockBackend::new(BackendOutput::text_only(r#"{"response":"Nice picture"}"#));
    let uploader = MockUploader::new();

    let request = PromptRequest::builder()
        .user_input(Some("What is in these?".to_string()))
        .attachment_urls(vec![
            "https://example.com/first.png".to_string(),
            "https://example.com/invalid.png".to_string(),
            "https://example.com/third.png".to_string(),
        ])
        .build()
        .unwrap();

    let result = service(&backend, &uploader)
        .generate_response(&request)
        .await
        .unwrap();

    assert!(!result.is_error());
    assert_eq!(uploader.calls(), 3);
    let uris: Vec<String> = backend
        .last_request()
        .attachments()
        .iter()
        .map(|handle| handle.uri().clone())
        .collect();
    assert_eq!(uris, vec!["files/first.png", "files/third.png"]);
}

#[tokio::test]
async fn test_history_is_replayed_in_order() {
    let backend = MockBackend::new(BackendOutput::text_only(r#"{"response":"Yes"}"#));
    let uploader = MockUploader::new();

    let request = PromptRequest::builder()
        .user_input(Some("And the next step?".to_string()))
        .template(Some(Template::Tutor))
        .history(vec![
            Exchange::new("What is 2+2?", json!({"response": "4"})),
            Exchange::new("And 3+3?", "6"),
            Exchange::new("Thanks", Value::Null),
        ])
        .build()
        .unwrap();

    service(&backend, &uploader)
        .generate_response(&request)
        .await
        .unwrap();

    let history = backend.last_request().history().clone();
    assert_eq!(history.len(), 6);
    let roles: Vec<Role> = history.iter().map(|turn| *turn.role()).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Model, Role::User, Role::Model, Role::User, Role::Model]
    );
    assert_eq!(history[1].text(), r#"{"response":"4"}"#);
    assert_eq!(history[3].text(), "6");
    assert_eq!(history[5].text(), "");
}

#[tokio::test]
async fn test_unknown_template_name_uses_default() {
    let backend = MockBackend::new(BackendOutput::text_only(r#"{"response":"Plain answer"}"#));
    let uploader = MockUploader::new();

    let request: PromptRequest = serde_json::from_value(json!({
        "user_input": "Tell me about the moon",
        "template": "poetry"
    }))
    .unwrap();

    let result = service(&backend, &uploader)
        .generate_response(&request)
        .await
        .unwrap();

    assert_eq!(*backend.last_request().template(), Template::Default);
    assert_eq!(result.response(), &json!({"response": "Plain answer"}));
}

#[tokio::test]
async fn test_resolver_skips_blank_urls() {
    let uploader = MockUploader::new();
    let resolver = AttachmentResolver::new(uploader.clone());

    let handles = resolver
        .resolve(&[
            String::new(),
            "  ".to_string(),
            "https://example.com/only.png".to_string(),
        ])
        .await;

    assert_eq!(handles.len(), 1);
    assert_eq!(uploader.calls(), 1);
}

#[tokio::test]
async fn test_resolver_returns_empty_when_everything_fails() {
    let resolver = AttachmentResolver::new(MockUploader::new());
    let handles = resolver
        .resolve(&["invalid-a".to_string(), "invalid-b".to_string()])
        .await;
    assert!(handles.is_empty());
}

/// Uploader that only completes once every upload of the batch is in flight.
struct RendezvousUploader {
    barrier: tokio::sync::Barrier,
}

#[async_trait]
impl FileUploader for RendezvousUploader {
    async fn upload(&self, url: &str) -> AitutorResult<AttachmentHandle> {
        self.barrier.wait().await;
        Ok(AttachmentHandle::new(url, "text/plain"))
    }
}

#[tokio::test]
async fn test_resolver_uploads_concurrently() {
    let urls: Vec<String> = (0..3).map(|i| format!("file-{i}.txt")).collect();
    let resolver = AttachmentResolver::new(RendezvousUploader {
        barrier: tokio::sync::Barrier::new(urls.len()),
    });

    let handles = tokio::time::timeout(Duration::from_secs(5), resolver.resolve(&urls))
        .await
        .expect("uploads should run concurrently");

    let uris: Vec<&str> = handles.iter().map(|handle| handle.uri().as_str()).collect();
    assert_eq!(uris, vec!["file-0.txt", "file-1.txt", "file-2.txt"]);
}
