//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ask the AI tutor from the command line.
#[derive(Parser, Debug)]
#[command(name = "aitutor")]
#[command(about = "AI tutor prompts over Gemini")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a prompt and print the normalized response as JSON
    Ask {
        /// The student's message
        prompt: String,

        /// Template name (e.g. tutor, summarize, generate_image)
        #[arg(short, long)]
        template: Option<String>,

        /// Attachment URL or local file path (repeatable)
        #[arg(short, long = "attach")]
        attachments: Vec<String>,

        /// JSON file holding prior exchanges: [{"prompt": ..., "response": ...}]
        #[arg(long)]
        history: Option<PathBuf>,

        /// Save a generated image, optionally into DIR instead of the configured directory
        #[arg(long, value_name = "DIR", num_args = 0..=1)]
        save_image: Option<Option<PathBuf>>,
    },

    /// List templates with their generation settings
    Templates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_repeated_attachments() {
        let cli = Cli::try_parse_from([
            "aitutor",
            "ask",
            "What is this?",
            "--template",
            "tutor",
            "--attach",
            "https://example.com/a.png",
            "--attach",
            "notes.pdf",
            "--save-image",
        ])
        .unwrap();

        match cli.command {
            Commands::Ask {
                prompt,
                template,
                attachments,
                save_image,
                ..
            } => {
                assert_eq!(prompt, "What is this?");
                assert_eq!(template.as_deref(), Some("tutor"));
                assert_eq!(attachments.len(), 2);
                assert_eq!(save_image, Some(None));
            }
            Commands::Templates => panic!("expected ask"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["aitutor", "templates", "--json-logs", "-c", "aitutor.toml"])
            .unwrap();
        assert!(cli.json_logs);
        assert_eq!(cli.config, Some(PathBuf::from("aitutor.toml")));
    }
}
