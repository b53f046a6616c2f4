use crate::prelude::{eprintln, println, *};
use codexpert_core::blocks::{Document, Segment};
use codexpert_core::types::FileContent;
use colored::Colorize;

pub mod analyze;
pub mod create_file;
pub mod generate;

/// Read context files from disk, skipping paths that do not exist.
pub async fn read_context_files(paths: &[String], verbose: bool) -> Vec<FileContent> {
    let mut files = Vec::new();

    for path in paths {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => files.push(FileContent {
                path: path.clone(),
                content,
            }),
            Err(e) => {
                if verbose {
                    eprintln!("Skipping context file '{}': {}", path, e);
                }
            }
        }
    }

    files
}

/// Print a parsed document to stdout, fencing code segments.
pub fn print_document(document: &Document) {
    for segment in &document.segments {
        match segment {
            Segment::Explanation { content } => {
                println!("{}\n", content);
            }
            Segment::Code { language, content } => {
                println!("{}", format!("```{language}").dimmed());
                println!("{}", content);
                println!("{}\n", "```".dimmed());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_context_files_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("a.txt");
        std::fs::write(&existing, "hello").unwrap();

        let paths = vec![
            existing.to_string_lossy().into_owned(),
            dir.path().join("missing.txt").to_string_lossy().into_owned(),
        ];

        let files = read_context_files(&paths, false).await;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, "hello");
    }
}
