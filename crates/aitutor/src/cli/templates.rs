//! Templates command handler.

use aitutor::Settings;

/// Prints every template with its effective configuration as JSON.
#[tracing::instrument(skip_all)]
pub fn handle_templates_command(settings: &Settings) -> anyhow::Result<()> {
    let registry = settings.registry()?;
    let listing: serde_json::Map<String, serde_json::Value> = registry
        .templates()
        .map(|(template, config)| -> Result<_, serde_json::Error> {
            Ok((template.to_string(), serde_json::to_value(config)?))
        })
        .collect::<Result<_, serde_json::Error>>()?;

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
