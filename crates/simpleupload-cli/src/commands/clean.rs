//! Clean command - Preview the filename normalizer
//!
//! `simpleupload clean "my file"` prints the name the upload command would
//! use with `--clean`, and whether it would still be flagged as invalid.

use anyhow::Result;
use clap::Args;
use simpleupload_core::domain::{
    capitalize_and_clean, is_invalid_filename, INVALID_FILENAME_WARNING,
};

use super::CommandContext;

/// Arguments for the clean subcommand
#[derive(Debug, Args)]
pub struct CleanCommand {
    /// Filename to normalize
    pub name: String,

    /// Extension appended when the name has none (without the dot)
    #[arg(long)]
    pub ext: Option<String>,
}

impl CleanCommand {
    /// Execute the clean command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let cleaned = capitalize_and_clean(&self.name, self.ext.as_deref());
        let valid = !is_invalid_filename(&cleaned);

        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "input": self.name,
                "cleaned": cleaned,
                "valid": valid,
            }));
        } else {
            formatter.success(&cleaned);
            if !valid {
                formatter.warn(INVALID_FILENAME_WARNING);
            }
        }

        Ok(())
    }
}
