//! aitutor command-line front end.

mod cli;

use aitutor::{Settings, init_observability, init_tracing, shutdown_observability};
use clap::Parser;
use cli::{AskOptions, Cli, Commands, handle_ask_command, handle_templates_command};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing(cli.json_logs);
    if let Err(e) = init_observability("aitutor", 60) {
        warn!(error = %e, "Metrics disabled");
    }

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let outcome = match cli.command {
        Commands::Ask {
            prompt,
            template,
            attachments,
            history,
            save_image,
        } => {
            let options = AskOptions {
                prompt,
                template,
                attachments,
                history,
                save_image,
            };
            handle_ask_command(&settings, options).await
        }
        Commands::Templates => handle_templates_command(&settings),
    };

    shutdown_observability();
    outcome
}
