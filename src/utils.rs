/*!
 * Utility functions for promptpack
 */

use std::fs;
use std::path::Path;

use ignore::WalkBuilder;
use walkdir::WalkDir;

use crate::config::Config;
use crate::walker::is_eligible;

/// Count eligible files across the configured targets for progress sizing.
///
/// This is a pre-pass; binary detection is skipped here, matching the
/// per-file progress increments during the real run.
pub fn count_files(config: &Config) -> u64 {
    let mut count = 0;

    for raw in &config.targets {
        if raw == "-" {
            count += 1;
            continue;
        }

        let path = Path::new(raw);
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => count += 1,
            Ok(meta) if meta.is_dir() => count += count_in_dir(path, config),
            _ => {}
        }
    }

    count
}

fn count_in_dir(dir: &Path, config: &Config) -> u64 {
    let mut count = 0;

    if config.respect_gitignore {
        for entry in WalkBuilder::new(dir).build().filter_map(Result::ok) {
            if entry.file_type().map_or(false, |ft| ft.is_file())
                && is_eligible(config, entry.path())
            {
                count += 1;
            }
        }
    } else {
        for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
            if entry.file_type().is_file() && is_eligible(config, entry.path()) {
                count += 1;
            }
        }
    }

    count
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }
}
