use crate::types::FileContent;

/// Marker inserted where over-limit content was cut.
const TRUNCATION_MARKER: &str = "\n... (content truncated) ...\n";

/// Render context files for embedding in a prompt.
///
/// Each file becomes a `File:` header followed by its content in an
/// untagged fence.
pub fn file_context(files: &[FileContent]) -> String {
    files
        .iter()
        .map(|file| format!("File: {}\n```\n{}\n```\n", file.path, file.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cap content at `max_chars` characters, keeping the first and last
/// halves around a truncation marker.
pub fn truncate_middle(content: &str, max_chars: usize) -> String {
    let total = content.chars().count();
    if total <= max_chars {
        return content.to_string();
    }

    let keep = max_chars / 2;
    let head: String = content.chars().take(keep).collect();
    let tail: String = content.chars().skip(total - keep).collect();
    format!("{head}{TRUNCATION_MARKER}{tail}")
}
