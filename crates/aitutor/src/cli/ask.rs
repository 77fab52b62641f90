//! Ask command handler.

use aitutor::{
    Exchange, GeminiClient, GeminiConfig, ImageStore, PromptRequest, PromptResponse,
    PromptService, Settings, Template,
};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Arguments of one `ask` invocation.
#[derive(Debug, Clone)]
pub struct AskOptions {
    /// Student message
    pub prompt: String,
    /// Template name, resolved leniently
    pub template: Option<String>,
    /// Attachment URLs or paths
    pub attachments: Vec<String>,
    /// JSON history file
    pub history: Option<PathBuf>,
    /// Save the generated image; inner value overrides the configured directory
    pub save_image: Option<Option<PathBuf>>,
}

/// Handles the ask command.
#[instrument(skip_all, fields(template = ?options.template))]
pub async fn handle_ask_command(settings: &Settings, options: AskOptions) -> anyhow::Result<()> {
    let registry = Arc::new(settings.registry()?);
    let config = settings.apply_to(GeminiConfig::from_env()?);
    let client = GeminiClient::new(config, registry.clone())?;
    let service = PromptService::new(client.clone(), client, registry);

    let history = match &options.history {
        Some(path) => load_history(path).await?,
        None => Vec::new(),
    };

    let request = PromptRequest::builder()
        .user_input(Some(options.prompt))
        .template(Some(Template::from_optional_name(options.template.as_deref())))
        .attachment_urls(options.attachments)
        .history(history)
        .build()?;

    let result = service.generate_response(&request).await?;
    let result = match options.save_image {
        Some(dir) if !result.image().is_empty() => {
            let store = ImageStore::new(dir.unwrap_or_else(|| settings.images.dir.clone()));
            with_saved_image(result, &store).await
        }
        _ => result,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn load_history(path: &Path) -> anyhow::Result<Vec<Exchange>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    let history: Vec<Exchange> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid history file {}", path.display()))?;
    info!(exchanges = history.len(), "Loaded conversation history");
    Ok(history)
}

/// Replaces the base64 image with its public path once stored.
async fn with_saved_image(result: PromptResponse, store: &ImageStore) -> PromptResponse {
    match store.store(result.image()).await {
        Some(public_path) => {
            let (response, _) = result.into_parts();
            PromptResponse::new(response, public_path)
        }
        None => result,
    }
}
