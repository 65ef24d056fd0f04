/*!
 * Per-file transcript block formatting
 */

/// Fence delimiter wrapped around file content.
const FENCE: &str = "```";

/// Format one file's contribution to a transcript.
///
/// Produces a `File:` header line with the display path, the content in a
/// fenced block, and a blank separator line. Content is embedded verbatim;
/// a body that itself contains the fence sequence is not re-escaped.
/// Consumers paste the result into an LLM chat prompt, so the template must
/// stay uniform across a transcript.
pub fn format_entry(display_path: &str, content: &str) -> String {
    let mut block = String::with_capacity(display_path.len() + content.len() + 24);
    block.push_str("File: ");
    block.push_str(display_path);
    block.push('\n');
    block.push_str(FENCE);
    block.push('\n');
    block.push_str(content);
    if !content.ends_with('\n') {
        block.push('\n');
    }
    block.push_str(FENCE);
    block.push_str("\n\n");
    block
}
