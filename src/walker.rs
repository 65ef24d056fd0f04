/*!
 * Recursive folder traversal producing transcript entries
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glob_match::glob_match;
use ignore::WalkBuilder;
use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::Config;
use crate::detect::is_likely_binary;
use crate::entry::format_entry;
use crate::error::{PromptPackError, Result, Warning};
use crate::preamble::PREAMBLE_FILENAME;
use crate::roots::{format_path, resolve_root, RootSet};

/// One formatted file produced by a walk or a direct read.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Root-relative or absolute display path
    pub display_path: String,
    /// The fully formatted transcript block
    pub block: String,
    /// Line count of the source content
    pub lines: usize,
    /// Character count of the source content
    pub chars: usize,
}

impl Entry {
    /// Build an entry from a display path and file content
    pub fn build(display_path: String, content: &str) -> Self {
        let block = format_entry(&display_path, content);
        Self {
            display_path,
            block,
            lines: content.lines().count(),
            chars: content.chars().count(),
        }
    }
}

/// Result of walking one folder.
#[derive(Debug, Default)]
pub struct WalkOutput {
    /// Entries in traversal order
    pub entries: Vec<Entry>,
    /// Recovered per-path failures
    pub warnings: Vec<Warning>,
}

/// Filename-level exclusion rules, applied only during traversal and never
/// to explicitly selected files.
pub(crate) fn is_eligible(config: &Config, path: &Path) -> bool {
    let name = path.file_name().unwrap_or_default().to_string_lossy();

    // The reserved preamble file never enters a walk; it is fetched
    // separately by the preamble lookup.
    if name == PREAMBLE_FILENAME {
        return false;
    }

    if config
        .ignore_patterns
        .iter()
        .any(|pattern| glob_match(pattern, &name))
    {
        return false;
    }

    if !config.include_patterns.is_empty()
        && !config
            .include_patterns
            .iter()
            .any(|pattern| glob_match(pattern, &name))
    {
        return false;
    }

    true
}

/// Recursive folder walker.
///
/// Each directory level is listed once, its files are read in parallel with
/// emission buffered in traversal order, then subdirectories are walked
/// depth-first. Files and subdirectories are name-sorted so a transcript is
/// deterministic across filesystems.
pub struct Walker {
    config: Config,
    roots: RootSet,
    progress: Arc<ProgressBar>,
    cancel: Arc<AtomicBool>,
}

impl Walker {
    /// Create a new walker
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

    /// Walk `folder` and return entries for every eligible descendant file.
    ///
    /// A failure to list `folder` itself is fatal for this walk; failures
    /// below it degrade to warnings and traversal continues with siblings.
    pub fn walk(&self, folder: &Path) -> Result<WalkOutput> {
        let abs = fs::canonicalize(folder).map_err(|source| PromptPackError::ListDirectory {
            path: folder.to_path_buf(),
            source,
        })?;
        if !abs.is_dir() {
            return Err(PromptPackError::NotADirectory(folder.to_path_buf()));
        }

        debug!("walking {}", abs.display());
        let mut out = WalkOutput::default();
        self.walk_directory(&abs, &mut out)?;
        Ok(out)
    }

    /// Read one file into a transcript entry.
    ///
    /// Shared with the assembler for explicitly selected files, which bypass
    /// the traversal-only exclusion rules but not the binary skip.
    pub fn read_file(&self, path: &Path) -> std::result::Result<Entry, Warning> {
        self.progress.inc(1);

        if is_likely_binary(path) {
            debug!("skipping binary file {}", path.display());
            return Err(Warning::new(path, "skipped binary file"));
        }

        let content = fs::read_to_string(path)
            .map_err(|err| Warning::new(path, format!("unreadable: {err}")))?;

        let display = format_path(path, resolve_root(path, &self.roots));
        Ok(Entry::build(display, &content))
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Emit one directory level, then recurse into its subdirectories.
    fn walk_directory(&self, dir: &Path, out: &mut WalkOutput) -> Result<()> {
        if self.cancelled() {
            return Ok(());
        }

        let (mut files, mut dirs) = self.list_level(dir, &mut out.warnings)?;
        files.sort();
        dirs.sort();

        // Parallel reads; collect preserves traversal order regardless of
        // completion order.
        let results: Vec<std::result::Result<Entry, Warning>> =
            files.par_iter().map(|path| self.read_file(path)).collect();
        for result in results {
            match result {
                Ok(entry) => out.entries.push(entry),
                Err(warning) => {
                    warn!("{warning}");
                    out.warnings.push(warning);
                }
            }
        }

        for sub in dirs {
            if self.cancelled() {
                return Ok(());
            }
            if let Err(err) = self.walk_directory(&sub, out) {
                let warning = Warning::new(&sub, err.to_string());
                warn!("{warning}");
                out.warnings.push(warning);
            }
        }

        Ok(())
    }

    /// List the immediate children of `dir`, split into eligible files and
    /// subdirectories.
    ///
    /// An unlistable `dir` is an error: fatal when it is the walk's top
    /// folder, degraded to a warning by the recursion for anything deeper.
    fn list_level(
        &self,
        dir: &Path,
        warnings: &mut Vec<Warning>,
    ) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        fs::read_dir(dir).map_err(|source| PromptPackError::ListDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        let mut dirs = Vec::new();

        if self.config.respect_gitignore {
            let mut builder = WalkBuilder::new(dir);
            builder.max_depth(Some(1));

            for entry in builder.build() {
                match entry {
                    Ok(entry) if entry.depth() == 0 => continue,
                    Ok(entry) => {
                        let path = entry.path().to_path_buf();
                        match entry.file_type() {
                            Some(ft) if ft.is_dir() => dirs.push(path),
                            Some(ft) if ft.is_file() => {
                                if is_eligible(&self.config, &path) {
                                    files.push(path);
                                }
                            }
                            _ => debug!("skipping non-regular entry {}", path.display()),
                        }
                    }
                    Err(err) => warnings.push(Warning::new(dir, err.to_string())),
                }
            }
        } else {
            for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
                match entry {
                    Ok(entry) => {
                        let path = entry.path().to_path_buf();
                        if entry.file_type().is_dir() {
                            dirs.push(path);
                        } else if entry.file_type().is_file() {
                            if is_eligible(&self.config, &path) {
                                files.push(path);
                            }
                        } else {
                            debug!("skipping non-regular entry {}", path.display());
                        }
                    }
                    Err(err) => warnings.push(Warning::new(dir, err.to_string())),
                }
            }
        }

        Ok((files, dirs))
    }
}
