/*!
 * Project-root synchronization into an external JSON config file
 */

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PromptPackError, Result};

/// On-disk shape of the sync target. Unknown keys are preserved verbatim.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SyncFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    root_folder: Option<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Record the primary root in the `root_folder` field of the JSON file at
/// `path`.
///
/// A missing or empty file counts as an empty config. The parent directory
/// is created when absent. The file is rewritten, pretty-printed with
/// 2-space indentation, only when the value actually changes. Returns
/// whether a write happened.
pub fn sync_root_folder(path: &Path, root: &Path) -> Result<bool> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(PromptPackError::ConfigWrite {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut config: SyncFile = if existing.trim().is_empty() {
        SyncFile::default()
    } else {
        serde_json::from_str(&existing)?
    };

    let root_value = root.display().to_string();
    if config.root_folder.as_deref() == Some(root_value.as_str()) {
        debug!("config {} already up to date", path.display());
        return Ok(false);
    }
    config.root_folder = Some(root_value);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| PromptPackError::ConfigWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let mut body = serde_json::to_string_pretty(&config)?;
    body.push('\n');
    fs::write(path, body).map_err(|source| PromptPackError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!("synced root_folder into {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_is_created_with_root_folder() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.json");

        let written = sync_root_folder(&config_path, Path::new("/ws")).unwrap();
        assert!(written);

        let body = fs::read_to_string(&config_path).unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["root_folder"], "/ws");
        // 2-space pretty printing
        assert!(body.contains("  \"root_folder\""));
    }

    #[test]
    fn unchanged_value_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        assert!(sync_root_folder(&config_path, Path::new("/ws")).unwrap());
        assert!(!sync_root_folder(&config_path, Path::new("/ws")).unwrap());
        assert!(sync_root_folder(&config_path, Path::new("/other")).unwrap());
    }

    #[test]
    fn unrelated_keys_are_preserved() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"root_folder": "/old", "model": "local", "port": 8080}"#,
        )
        .unwrap();

        assert!(sync_root_folder(&config_path, Path::new("/new")).unwrap());

        let value: Value =
            serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
        assert_eq!(value["root_folder"], "/new");
        assert_eq!(value["model"], "local");
        assert_eq!(value["port"], 8080);
    }

    #[test]
    fn empty_file_counts_as_empty_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, "").unwrap();

        assert!(sync_root_folder(&config_path, Path::new("/ws")).unwrap());
        let value: Value =
            serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
        assert_eq!(value["root_folder"], "/ws");
    }
}
