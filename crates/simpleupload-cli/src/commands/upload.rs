//! Upload command - Upload a file and move it into a saved directory
//!
//! Runs the whole workflow for one file:
//! 1. Resolves the final filename (`--name`, `--clean`) and refuses names
//!    that look invalid unless `--force` is given
//! 2. Uploads the file, showing progress
//! 3. Moves it into `--dir`, or into the directory suggested from the
//!    file's extension

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use simpleupload_core::domain::{
    capitalize_and_clean, destination_path, is_invalid_filename, UploadTarget, WorkflowPhase,
    INVALID_FILENAME_WARNING,
};
use simpleupload_core::usecases::UploadWorkflow;
use tracing::{debug, info};

use super::CommandContext;
use crate::notifier::ConsoleNotifier;
use crate::output::OutputFormatter;

/// Arguments for the upload subcommand
#[derive(Debug, Args)]
pub struct UploadCommand {
    /// Local file to upload
    pub file: PathBuf,

    /// Saved directory to move the file into (defaults to the suggestion)
    #[arg(long)]
    pub dir: Option<String>,

    /// Filename to save under (defaults to the local file name)
    #[arg(long)]
    pub name: Option<String>,

    /// Normalize the filename: join words in camelCase, add a missing extension
    #[arg(long)]
    pub clean: bool,

    /// Save even if the filename looks invalid
    #[arg(long)]
    pub force: bool,
}

impl UploadCommand {
    /// Execute the upload command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();

        let target = UploadTarget::from_path(&self.file)
            .with_context(|| format!("'{}' is not a file path", self.file.display()))?;
        let filename = resolve_filename(self.name.as_deref(), &target, self.clean);
        if filename.is_empty() {
            bail!("The filename must not be empty");
        }
        if is_invalid_filename(&filename) {
            if !self.force {
                bail!(
                    "'{}': {}\nPass --force to save it anyway, or --clean to normalize it",
                    filename,
                    INVALID_FILENAME_WARNING
                );
            }
            formatter.warn(&format!("Saving under '{}' as requested", filename));
        }
        debug!(filename = %filename, "Resolved target filename");

        let client = ctx.client()?;
        let mut workflow = UploadWorkflow::new(Arc::new(client));
        if !ctx.is_json() {
            workflow = workflow.with_notifier(Arc::new(ConsoleNotifier::new(ctx.formatter())));
        }
        workflow.select_file(
            Some(target.path().to_path_buf()),
            Some(target.display_name().to_string()),
        )?;

        // Render progress while the upload runs
        let mut rx = workflow.subscribe();
        let progress_formatter: Arc<dyn OutputFormatter> = Arc::from(ctx.formatter());
        let renderer = Arc::clone(&progress_formatter);
        let progress = tokio::spawn(async move {
            let mut last = None;
            while rx.changed().await.is_ok() {
                let percent = match rx.borrow_and_update().phase() {
                    WorkflowPhase::Uploading { progress, .. } => Some(*progress),
                    _ => None,
                };
                if let Some(percent) = percent.filter(|p| *p < 100 && Some(*p) != last) {
                    renderer.progress(percent);
                    last = Some(percent);
                }
            }
        });

        info!(file = %self.file.display(), "Uploading");
        let uploaded = workflow.upload().await;
        progress.abort();
        // The renderer may still be mid-draw until the abort lands
        let _ = progress.await;
        let remote = match uploaded {
            Ok(remote) => remote,
            Err(err) => {
                progress_formatter.end_progress();
                return Err(err)
                    .with_context(|| format!("Failed to upload {}", self.file.display()));
            }
        };
        progress_formatter.progress(100);
        formatter.info(&format!("Uploaded as {}", remote));

        let state = workflow.state();
        if let Some(error) = state.error() {
            formatter.warn(error);
        }

        let directory = match self
            .dir
            .clone()
            .or_else(|| state.suggested_dir().map(str::to_string))
        {
            Some(directory) => directory,
            None => {
                if let Some(dirs) = state.saved_dirs() {
                    formatter.info("Available directories:");
                    for dir in dirs {
                        formatter.info(&format!("  {}", dir));
                    }
                }
                bail!(
                    "No directory suggested for '{}'. Re-run with --dir, or move the upload \
                     with 'simpleupload move {} <directory>/{}'",
                    target.display_name(),
                    remote,
                    filename
                );
            }
        };
        if self.dir.is_none() {
            formatter.info(&format!("Suggested directory: {}", directory));
        }

        let moved = workflow
            .move_to(&directory, &filename)
            .await
            .with_context(|| {
                format!(
                    "Failed to move {} (retry with 'simpleupload move {} {}')",
                    remote,
                    remote,
                    destination_path(&directory, &filename)
                )
            })?;

        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "file": self.file.display().to_string(),
                "remote": remote.as_str(),
                "directory": directory,
                "filename": filename,
                "moved_to": moved.moved_to,
            }));
        }

        Ok(())
    }
}

/// Returns the name to save under: `name` or the local file name,
/// normalized with the local extension as fallback when `clean` is set
fn resolve_filename(name: Option<&str>, target: &UploadTarget, clean: bool) -> String {
    let base = name.unwrap_or_else(|| target.display_name());
    if clean {
        capitalize_and_clean(base, target.extension())
    } else {
        base.to_string()
    }
}
