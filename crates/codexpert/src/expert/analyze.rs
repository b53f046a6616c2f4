use crate::prelude::{eprintln, println, *};
use codexpert_core::blocks::{extract, Document, Segment};
use codexpert_core::context::truncate_middle;
use codexpert_core::prompt::{build_analysis_prompt, build_summary_prompt};
use codexpert_core::scan::{is_core_project_file, FileInfo};
use colored::Colorize;
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::Path;

/// Per-file content cap before the first and last halves are kept.
const ANALYSIS_CONTENT_LIMIT: usize = 2000;

#[derive(Debug, clap::Parser)]
pub struct AnalyzeOptions {
    /// Directory containing the codebase to analyze
    pub directory: String,

    /// The question to answer about the codebase
    pub query: String,

    /// LM Studio base URL
    #[clap(long)]
    pub api_url: Option<String>,

    /// Model name
    #[clap(long)]
    pub model: Option<String>,

    /// Output as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub blocks: Document,
    pub files_analyzed: usize,
}

pub async fn run(options: AnalyzeOptions, global: crate::Global) -> Result<()> {
    let config = crate::llm::LmStudioConfig::from_env()
        .with_overrides(options.api_url.clone(), options.model.clone());
    let client = crate::llm::create_client()?;

    if global.verbose {
        eprintln!("Analyzing directory: {}", options.directory);
        eprintln!("Model: {}", config.model);
    }

    let output = analyze_data(
        &options.directory,
        &options.query,
        &client,
        &config,
        global.verbose,
    )
    .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        super::print_document(&output.blocks);
        println!("{} {}", "Files analyzed:".bold(), output.files_analyzed);
    }

    Ok(())
}

/// Collect the core project files under a directory.
///
/// Walks the tree with gitignore rules applied and keeps only the files
/// the analysis heuristic selects, in stable path order.
pub fn scan_directory(directory: &Path) -> Vec<FileInfo> {
    let mut files = Vec::new();

    for entry in WalkBuilder::new(directory).build().flatten() {
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(directory) else {
            continue;
        };
        let relative_path = relative.to_string_lossy().replace('\\', "/");
        if !is_core_project_file(&relative_path) {
            continue;
        }

        files.push(FileInfo {
            path: path.to_string_lossy().into_owned(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            relative_path,
            size: entry.metadata().map(|m| m.len()).unwrap_or(0),
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    files
}

/// Analyze a codebase and answer a query about it (shared by the CLI and
/// the HTTP server).
///
/// Files that cannot be read or analyzed are skipped; the remaining
/// analyses are rolled up into one summary, parsed into blocks.
pub async fn analyze_data(
    directory: &str,
    query: &str,
    client: &reqwest::Client,
    config: &crate::llm::LmStudioConfig,
    verbose: bool,
) -> Result<AnalyzeOutput> {
    let root = Path::new(directory);
    if !root.is_dir() {
        return Err(eyre!("Directory not found: {}", directory));
    }

    let files = scan_directory(root);
    if verbose {
        eprintln!("Found {} core project files", files.len());
    }

    if files.is_empty() {
        return Ok(AnalyzeOutput {
            blocks: explanation_only(format!("No code files found in directory: {directory}")),
            files_analyzed: 0,
        });
    }

    let mut analyses = Vec::new();
    for file in &files {
        let content = match tokio::fs::read_to_string(&file.path).await {
            Ok(content) => content,
            Err(e) => {
                if verbose {
                    eprintln!("Skipping '{}': {}", file.path, e);
                }
                continue;
            }
        };

        let content = truncate_middle(&content, ANALYSIS_CONTENT_LIMIT);
        let prompt = build_analysis_prompt(&file.path, &content);

        match crate::llm::ask(client, config, &prompt).await {
            Ok(analysis) => analyses.push(format!("### Analysis for {}:\n{}", file.name, analysis)),
            Err(e) => {
                if verbose {
                    eprintln!("Skipping '{}': {}", file.path, e);
                }
            }
        }
    }

    if analyses.is_empty() {
        return Ok(AnalyzeOutput {
            blocks: explanation_only("Could not analyze any files in the directory".to_string()),
            files_analyzed: 0,
        });
    }

    let files_analyzed = analyses.len();
    let summary = crate::llm::ask(client, config, &build_summary_prompt(&analyses, query)).await?;

    let mut blocks = extract(&summary);
    if blocks.is_empty() {
        blocks = explanation_only(summary);
    }

    Ok(AnalyzeOutput {
        blocks,
        files_analyzed,
    })
}

fn explanation_only(content: String) -> Document {
    Document {
        segments: vec![Segment::Explanation { content }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_directory_selects_core_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::create_dir_all(dir.path().join("src/components")).unwrap();
        std::fs::write(dir.path().join("src/App.jsx"), "x").unwrap();
        std::fs::write(dir.path().join("src/components/Button.tsx"), "x").unwrap();
        std::fs::write(dir.path().join("src/helper.js"), "x").unwrap();
        std::fs::write(dir.path().join("README.md"), "x").unwrap();

        let files = scan_directory(dir.path());
        let relative: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            relative,
            vec!["package.json", "src/App.jsx", "src/components/Button.tsx"]
        );
    }

    #[test]
    fn test_scan_directory_records_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();

        let files = scan_directory(dir.path());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "package.json");
        assert_eq!(files[0].size, 2);
    }
}
