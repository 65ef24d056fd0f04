/*!
 * Preamble lookup: project-level first, then the configured global file
 */

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::config::Config;
use crate::error::Warning;
use crate::roots::RootSet;

/// Reserved preamble filename, checked case-sensitively at the primary root
/// and excluded from folder walks.
pub const PREAMBLE_FILENAME: &str = ".promptpack.md";

/// Resolve the preamble text for one aggregation run.
///
/// A readable project-level file at the primary root wins outright; the
/// global path is only consulted when the project file is absent or
/// unreadable. The returned text carries exactly two trailing newlines, or
/// is empty when no preamble applies.
pub fn preamble_for(config: &Config, roots: &RootSet) -> (String, Vec<Warning>) {
    let mut warnings = Vec::new();

    if !config.include_preamble {
        return (String::new(), warnings);
    }

    if let Some(root) = roots.primary() {
        let project = root.join(PREAMBLE_FILENAME);
        match fs::read_to_string(&project) {
            Ok(text) => {
                debug!("using project preamble {}", project.display());
                return (with_separator(&text), warnings);
            }
            // A missing project preamble is the normal case; fall through.
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                warnings.push(Warning::new(&project, format!("preamble unreadable: {err}")));
            }
        }
    }

    if let Some(global) = &config.global_preamble_path {
        match fs::read_to_string(global) {
            Ok(text) => {
                debug!("using global preamble {}", global.display());
                return (with_separator(&text), warnings);
            }
            // A configured global path that cannot be read, missing
            // included, indicates a misconfiguration worth surfacing.
            Err(err) => {
                warnings.push(Warning::new(global, format!("global preamble unreadable: {err}")));
            }
        }
    }

    (String::new(), warnings)
}

/// Normalize preamble text to exactly two trailing newlines.
fn with_separator(text: &str) -> String {
    format!("{}\n\n", text.trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_is_exactly_two_newlines() {
        assert_eq!(with_separator("SYS"), "SYS\n\n");
        assert_eq!(with_separator("SYS\n"), "SYS\n\n");
        assert_eq!(with_separator("SYS\n\n\n"), "SYS\n\n");
    }
}
