/*!
 * Clipboard sink for assembled transcripts
 *
 * Shells out to the platform clipboard tool, trying a short list of
 * providers in preference order. The core hands over one opaque string and
 * knows nothing else about the sink.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use log::debug;
use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the provider command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// A sink that receives one assembled transcript.
pub trait ClipboardSink {
    /// Copy text to the clipboard
    fn copy(&self, text: &str) -> Result<()>;
}

/// Command-line clipboard providers.
#[derive(Debug, Clone, Copy)]
enum Provider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOs,
    Windows,
}

impl Provider {
    fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::MacOs => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
        }
    }
}

impl ClipboardSink for Provider {
    fn copy(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        pipe_through(cmd, args, text)
    }
}

/// Copy `text` to the system clipboard using the first available provider.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = detect_provider().ok_or(ClipboardError::NoClipboardFound)?;
    debug!("clipboard provider: {provider:?}");
    provider.copy(text)
}

/// Pick a provider for the current platform and session.
fn detect_provider() -> Option<Provider> {
    // Inside tmux, its buffer reaches every attached client.
    if env::var_os("TMUX").is_some() && command_exists("tmux") {
        return Some(Provider::Tmux);
    }
    if cfg!(target_os = "macos") && command_exists("pbcopy") {
        return Some(Provider::MacOs);
    }
    if (cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some())
        && command_exists("clip.exe")
    {
        return Some(Provider::Windows);
    }
    if env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy") {
        return Some(Provider::Wayland);
    }
    if command_exists("xsel") {
        return Some(Provider::Xsel);
    }
    if command_exists("xclip") {
        return Some(Provider::Xclip);
    }
    None
}

/// Check whether `command` resolves on PATH.
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH").map_or(false, |paths| {
        env::split_paths(&paths).any(|dir| dir.join(command).is_file())
    })
}

/// Spawn `cmd` and pipe `text` through its stdin.
fn pipe_through(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|_| ClipboardError::CommandFailed(format!("failed to spawn {cmd}")))?;

    child
        .stdin
        .as_mut()
        .ok_or_else(|| ClipboardError::CommandFailed(format!("failed to open stdin for {cmd}")))?
        .write_all(text.as_bytes())?;

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{cmd} exited with status {status}"
        )))
    }
}
