use std::path::PathBuf;

use clap::Parser;

use crate::config::FileConfig;

#[derive(Parser, Debug)]
#[command(name = "autopush")]
#[command(about = "Stage everything, commit with a timestamped message and push")]
#[command(version)]
pub struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Use this config file instead of the user and repository files
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Remote to push to (default: origin)
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Wait for a keypress before exiting
    #[arg(long)]
    pub pause: bool,

    /// Stop at the first failed step and exit non-zero
    #[arg(long)]
    pub strict: bool,

    /// Ask before pushing
    #[arg(long)]
    pub confirm: bool,

    /// Do nothing when the working tree has no changes
    #[arg(long)]
    pub skip_if_clean: bool,

    /// Print the git commands without running add, commit or push
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The command-line layer of the configuration; absent flags leave the
    /// file layers untouched
    pub fn overrides(&self) -> FileConfig {
        FileConfig {
            remote: self.remote.clone(),
            suffix: None,
            timestamp_format: None,
            pause: self.pause.then_some(true),
            strict: self.strict.then_some(true),
            confirm_push: self.confirm.then_some(true),
            skip_if_clean: self.skip_if_clean.then_some(true),
        }
    }
}
