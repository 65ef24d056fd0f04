/*!
 * Binary content detection
 */

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Number of leading bytes inspected when classifying a file.
const DETECT_WINDOW: usize = 1024;

/// Classify a file as likely binary by inspecting its leading bytes.
///
/// Reads at most the first 1024 bytes; any 0x00 byte in that window marks
/// the file binary. An empty file is text. Any read error also classifies
/// binary, so an unreadable file is skipped rather than copied into a
/// transcript. Text encodings that legitimately embed null bytes are
/// misclassified; accepted trade-off.
pub fn is_likely_binary(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return true,
    };

    let mut buf = [0u8; DETECT_WINDOW];
    let mut filled = 0;
    while filled < DETECT_WINDOW {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(_) => return true,
        }
    }

    buf[..filled].contains(&0)
}
