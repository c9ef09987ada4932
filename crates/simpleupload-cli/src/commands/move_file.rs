//! Move command - Move a pending upload by hand
//!
//! `simpleupload move <REMOTE> <DIR>/<NAME>` sends a single move request,
//! for uploads left pending by an interrupted or refused `upload`.

use anyhow::{bail, Context, Result};
use clap::Args;
use simpleupload_core::ports::Notification;
use tracing::info;

use super::CommandContext;

/// Arguments for the move subcommand
#[derive(Debug, Args)]
pub struct MoveCommand {
    /// Server path of the upload (as printed by `upload` or `uploads`)
    pub remote: String,

    /// Destination as <directory>/<filename>
    pub destination: String,
}

impl MoveCommand {
    /// Execute the move command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        validate_destination(&self.destination)?;

        let client = ctx.client()?;
        info!(remote = %self.remote, destination = %self.destination, "Moving upload");

        let moved = client
            .move_file(&self.remote, &self.destination)
            .await
            .with_context(|| format!("Failed to move {}", self.remote))?;

        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "remote": self.remote,
                "moved_to": moved.moved_to,
            }));
        } else {
            formatter.success(&Notification::moved(&moved.moved_to).body);
        }

        Ok(())
    }
}

/// Requires a non-empty directory and filename around the first `/`
fn validate_destination(destination: &str) -> Result<()> {
    match destination.split_once('/') {
        Some((dir, name)) if !dir.trim().is_empty() && !name.is_empty() => Ok(()),
        _ => bail!(
            "Destination '{}' must look like <directory>/<filename>",
            destination
        ),
    }
}
