/*!
 * Transcript assembly: preamble plus ordered per-target entries
 */

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, Warning};
use crate::preamble::preamble_for;
use crate::report::FileReportInfo;
use crate::roots::RootSet;
use crate::walker::{Entry, Walker};

/// Display path used for selection text piped through stdin.
pub const SELECTION_LABEL: &str = "selection";

/// An aggregation target with its filesystem classification.
///
/// Created when the caller supplies a target; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    /// Regular file, read directly
    File(PathBuf),
    /// Directory, handed to the folder walker
    Directory(PathBuf),
    /// Non-filesystem resource: selection text from stdin
    Selection,
}

impl FileRef {
    /// Classify a raw target argument against the filesystem.
    ///
    /// An inaccessible explicit target is a warning for the caller to
    /// surface, not an abort.
    pub fn classify(raw: &str) -> std::result::Result<Self, Warning> {
        if raw == "-" {
            return Ok(Self::Selection);
        }

        let path = PathBuf::from(raw);
        let abs = fs::canonicalize(&path)
            .map_err(|err| Warning::new(&path, format!("cannot access target: {err}")))?;
        let meta = fs::metadata(&abs)
            .map_err(|err| Warning::new(&abs, format!("cannot access target: {err}")))?;

        if meta.is_dir() {
            Ok(Self::Directory(abs))
        } else if meta.is_file() {
            Ok(Self::File(abs))
        } else {
            Err(Warning::new(abs, "not a regular file or directory"))
        }
    }
}

/// A fully assembled transcript, ready for the clipboard sink.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Final clipboard payload
    pub text: String,
    /// Number of file entries, preamble excluded
    pub file_count: usize,
    /// Recovered per-path failures
    pub warnings: Vec<Warning>,
    /// Per-file line/char details keyed by display path
    pub file_details: HashMap<String, FileReportInfo>,
}

/// Result of one aggregation run.
#[derive(Debug)]
pub enum Outcome {
    /// A transcript was produced
    Copied(Transcript),
    /// No eligible content was found; informational, not an error
    Nothing { warnings: Vec<Warning> },
    /// The run was cancelled; partial entries are discarded
    Cancelled,
}

/// Assembles transcripts from the configured targets.
pub struct TranscriptAssembler {
    config: Config,
    roots: RootSet,
    progress: Arc<ProgressBar>,
    cancel: Arc<AtomicBool>,
}

impl TranscriptAssembler {
    /// Create a new assembler
    pub fn new(
        config: Config,
        roots: RootSet,
        progress: Arc<ProgressBar>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            roots,
            progress,
            cancel,
        }
    }

    /// Assemble one transcript from the configured targets.
    ///
    /// Failures on individual targets degrade to warnings; only a
    /// configuration-level problem is an error.
    pub fn assemble(&self) -> Result<Outcome> {
        let (preamble, mut warnings) = preamble_for(&self.config, &self.roots);
        let walker = Walker::new(
            self.config.clone(),
            self.roots.clone(),
            Arc::clone(&self.progress),
            Arc::clone(&self.cancel),
        );

        let mut entries: Vec<Entry> = Vec::new();
        for raw in &self.config.targets {
            if self.cancel.load(Ordering::Relaxed) {
                info!("aggregation cancelled, discarding partial entries");
                return Ok(Outcome::Cancelled);
            }

            let target = match FileRef::classify(raw) {
                Ok(target) => target,
                Err(warning) => {
                    warn!("{warning}");
                    warnings.push(warning);
                    continue;
                }
            };

            match target {
                FileRef::Selection => match read_selection() {
                    Ok(Some(entry)) => entries.push(entry),
                    Ok(None) => debug!("empty selection, nothing to add"),
                    Err(warning) => {
                        warn!("{warning}");
                        warnings.push(warning);
                    }
                },
                FileRef::File(path) => match walker.read_file(&path) {
                    Ok(entry) => entries.push(entry),
                    Err(warning) => {
                        warn!("{warning}");
                        warnings.push(warning);
                    }
                },
                FileRef::Directory(path) => match walker.walk(&path) {
                    Ok(mut output) => {
                        entries.append(&mut output.entries);
                        warnings.append(&mut output.warnings);
                    }
                    Err(err) => {
                        let warning = Warning::new(&path, err.to_string());
                        warn!("{warning}");
                        warnings.push(warning);
                    }
                },
            }
        }

        if self.cancel.load(Ordering::Relaxed) {
            info!("aggregation cancelled, discarding partial entries");
            return Ok(Outcome::Cancelled);
        }

        if entries.is_empty() {
            info!("no copyable content found");
            return Ok(Outcome::Nothing { warnings });
        }

        let mut text = String::new();
        if !preamble.is_empty() {
            text.push_str(&preamble);
        }

        let mut file_details = HashMap::with_capacity(entries.len());
        for entry in &entries {
            text.push_str(&entry.block);
            file_details.insert(
                entry.display_path.clone(),
                FileReportInfo {
                    lines: entry.lines,
                    chars: entry.chars,
                },
            );
        }

        Ok(Outcome::Copied(Transcript {
            text,
            file_count: entries.len(),
            warnings,
            file_details,
        }))
    }
}

/// Read selection text from stdin; empty input contributes nothing.
fn read_selection() -> std::result::Result<Option<Entry>, Warning> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|err| Warning::new("-", format!("cannot read selection: {err}")))?;

    if buf.is_empty() {
        return Ok(None);
    }
    Ok(Some(Entry::build(SELECTION_LABEL.to_string(), &buf)))
}
