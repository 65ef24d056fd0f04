/*!
 * Console report for completed aggregation runs
 *
 * Renders a summary of what was copied using the tabled library, including
 * an approximate LLM token count for the transcript.
 */

use std::collections::HashMap;
use std::time::Duration;

use once_cell::sync::Lazy;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};
use tiktoken_rs::{cl100k_base, CoreBPE};

use crate::utils::format_file_size;

/// Lazily constructed BPE used for approximate token counts.
static BPE: Lazy<Option<CoreBPE>> = Lazy::new(|| cl100k_base().ok());

/// Approximate LLM token count for `text`, when the tokenizer is available.
pub fn count_tokens(text: &str) -> Option<usize> {
    BPE.as_ref()
        .map(|bpe| bpe.encode_with_special_tokens(text).len())
}

/// Per-file details shown in the report
#[derive(Debug, Clone, Default)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Summary of one aggregation run
#[derive(Debug, Clone)]
pub struct CopyReport {
    /// Where the transcript went ("clipboard" or "stdout")
    pub destination: String,
    /// Time taken to assemble and deliver
    pub duration: Duration,
    /// Number of file entries in the transcript
    pub file_count: usize,
    /// Size of the transcript in bytes
    pub transcript_bytes: usize,
    /// Transcript token count, when the tokenizer is available
    pub total_tokens: Option<usize>,
    /// Number of warnings surfaced during the run
    pub warnings: usize,
    /// Details for each file, keyed by display path
    pub file_details: HashMap<String, FileReportInfo>,
}

/// Report generator for aggregation results
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &CopyReport) {
        println!("\n{}", self.generate_report(report));
    }

    /// Generate the full report string
    pub fn generate_report(&self, report: &CopyReport) -> String {
        let files_title = if report.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES"
        } else {
            "📋  COPIED FILES"
        };

        format!(
            "{}\n{}\n\n✅  COPY COMPLETE\n{}",
            files_title,
            self.files_table(report),
            self.summary_table(report)
        )
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    fn summary_table(&self, report: &CopyReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,
            #[tabled(rename = "Value")]
            value: String,
        }

        let token_text = match report.total_tokens {
            Some(tokens) => format!("{} tokens (counted)", self.format_number(tokens)),
            None => format!(
                "{} tokens (estimated)",
                self.format_number(report.transcript_bytes / 4)
            ),
        };

        let mut rows = vec![
            SummaryRow {
                key: "📎 Destination".to_string(),
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Copied".to_string(),
                value: self.format_number(report.file_count),
            },
            SummaryRow {
                key: "📦 Transcript Size".to_string(),
                value: format_file_size(report.transcript_bytes as u64),
            },
            SummaryRow {
                key: "🤖 LLM Tokens".to_string(),
                value: token_text,
            },
        ];

        if report.warnings > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Warnings".to_string(),
                value: self.format_number(report.warnings),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn files_table(&self, report: &CopyReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,
            #[tabled(rename = "Lines")]
            lines: String,
            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));

        let shown = if files.len() > 15 {
            &files[..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = shown
            .iter()
            .map(|(path, info)| FileRow {
                path: truncate_path(path, 60),
                lines: self.format_number(info.lines),
                tokens: self.format_number(info.chars / 4),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorten a display path to `max_len`, keeping the trailing segments.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let mut kept = Vec::new();
    let mut used = 3; // room for the leading "..."
    for segment in path.split('/').rev() {
        let cost = segment.len() + 1;
        if used + cost > max_len {
            break;
        }
        kept.push(segment);
        used += cost;
    }

    if kept.is_empty() {
        return format!("...{}", &path[path.len().saturating_sub(max_len - 3)..]);
    }

    let mut result = String::from("...");
    for segment in kept.iter().rev() {
        result.push('/');
        result.push_str(segment);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_paths_are_untouched() {
        assert_eq!(truncate_path("src/lib.rs", 60), "src/lib.rs");
    }

    #[test]
    fn long_paths_keep_trailing_segments() {
        let path = "very/long/nested/path/with/many/segments/ending/in/file.rs";
        let shortened = truncate_path(path, 24);
        assert!(shortened.starts_with("..."));
        assert!(shortened.ends_with("file.rs"));
        assert!(shortened.len() <= 24);
    }
}
