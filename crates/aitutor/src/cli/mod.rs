//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the aitutor binary.

mod ask;
mod commands;
mod templates;

pub use ask::{AskOptions, handle_ask_command};
pub use commands::{Cli, Commands};
pub use templates::handle_templates_command;
