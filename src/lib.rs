/*!
 * promptpack - Copy workspace files as an LLM-ready prompt transcript
 *
 * This library aggregates text content from a workspace (explicit files,
 * recursively-walked folders, or piped selection text) into a single
 * clipboard-ready transcript for pasting into a large-language-model chat
 * prompt, optionally prefixed by a reusable preamble.
 */

pub mod clipboard;
pub mod config;
pub mod detect;
pub mod entry;
pub mod error;
pub mod preamble;
pub mod report;
pub mod roots;
pub mod sync;
pub mod transcript;
pub mod utils;
pub mod walker;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use detect::is_likely_binary;
pub use entry::format_entry;
pub use error::{PromptPackError, Result, Warning};
pub use preamble::{preamble_for, PREAMBLE_FILENAME};
pub use report::{CopyReport, FileReportInfo, Reporter};
pub use roots::{format_path, resolve_root, RootSet};
pub use sync::sync_root_folder;
pub use transcript::{FileRef, Outcome, Transcript, TranscriptAssembler};
pub use walker::{Entry, WalkOutput, Walker};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
