//! Shell completion scripts
//!
//! `simpleupload completions zsh` prints the script; `--output <FILE>` writes
//! it to a file instead, e.g.
//! `simpleupload completions bash --output ~/.local/share/bash-completion/completions/simpleupload`

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;

/// Arguments for the completions subcommand
#[derive(Debug, clap::Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    pub async fn execute(&self) -> Result<()> {
        match &self.output {
            Some(path) => {
                let mut file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                self.render(&mut file)?;
                file.flush()
                    .with_context(|| format!("Failed to write {}", path.display()))
            }
            None => self.render(&mut io::stdout().lock()),
        }
    }

    /// Writes the completion script for the selected shell into `out`
    fn render(&self, out: &mut dyn Write) -> Result<()> {
        let mut cmd = crate::Cli::command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, bin_name, out);
        Ok(())
    }
}
