/*!
 * Configuration handling for promptpack
 */

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::{PromptPackError, Result};

/// Command-line arguments for promptpack
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "promptpack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy workspace files as an LLM-ready prompt transcript",
    long_about = "Aggregates selected files, folders, or piped text into a single transcript \
formatted for pasting into a large-language-model chat prompt, with an optional reusable \
preamble prepended."
)]
pub struct Args {
    /// Files or directories to aggregate ("-" reads selection text from stdin)
    #[clap(default_value = ".")]
    pub targets: Vec<String>,

    /// Workspace root used for relative display paths (repeat for multiple roots)
    #[clap(long = "root")]
    pub roots: Vec<String>,

    /// Skip the preamble lookup entirely
    #[clap(long)]
    pub no_preamble: bool,

    /// Fallback preamble file used when the primary root has none
    #[clap(long)]
    pub global_preamble: Option<String>,

    /// JSON config file whose root_folder field tracks the primary root
    #[clap(long)]
    pub sync_config: Option<String>,

    /// Comma-separated list of filename patterns to skip during folder walks
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Comma-separated list of filename patterns to include (if specified, only matching files are walked)
    #[clap(long, value_delimiter = ',')]
    pub include_patterns: Vec<String>,

    /// Respect .gitignore files during folder walks
    #[clap(long)]
    pub respect_gitignore: bool,

    /// Number of threads to use for reading files
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Print the transcript to stdout instead of copying it to the clipboard
    #[clap(long)]
    pub stdout: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
///
/// A read-only snapshot taken once per aggregation run and passed
/// explicitly into every core function.
#[derive(Clone, Debug)]
pub struct Config {
    /// Raw targets as supplied by the caller, classified at aggregation time
    pub targets: Vec<String>,

    /// Candidate workspace roots, most significant first
    pub roots: Vec<PathBuf>,

    /// Whether to look up and prepend a preamble
    pub include_preamble: bool,

    /// Global fallback preamble file
    pub global_preamble_path: Option<PathBuf>,

    /// Sync target for the root_folder config field
    pub sync_config_path: Option<PathBuf>,

    /// Filename patterns to skip during folder walks
    pub ignore_patterns: Vec<String>,

    /// Filename patterns to include (if empty, include all)
    pub include_patterns: Vec<String>,

    /// Whether to respect .gitignore files during folder walks
    pub respect_gitignore: bool,

    /// Number of threads to use for reading files
    pub num_threads: usize,

    /// Print to stdout instead of copying to the clipboard
    pub to_stdout: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let roots: Vec<PathBuf> = if args.roots.is_empty() {
            std::env::current_dir().into_iter().collect()
        } else {
            args.roots
                .into_iter()
                .map(|r| {
                    let path = PathBuf::from(r);
                    fs::canonicalize(&path).unwrap_or(path)
                })
                .collect()
        };

        Self {
            targets: args.targets,
            roots,
            include_preamble: !args.no_preamble,
            global_preamble_path: args.global_preamble.map(PathBuf::from),
            sync_config_path: args.sync_config.map(PathBuf::from),
            ignore_patterns: args.ignore_patterns,
            include_patterns: args.include_patterns,
            respect_gitignore: args.respect_gitignore,
            num_threads: args.threads,
            to_stdout: args.stdout,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(PromptPackError::NoTargetsSelected);
        }

        for root in &self.roots {
            ensure!(
                root.is_dir(),
                Config,
                "root is not a directory: {}",
                root.display()
            );
        }

        Ok(())
    }
}
