use crate::prelude::{eprintln, println, *};
use codexpert_core::blocks::{extract, Document, Segment};
use codexpert_core::prompt::build_creation_prompt;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, clap::Parser)]
pub struct CreateFileOptions {
    /// Path of the file to create
    pub path: String,

    /// Description of what the file should contain
    pub description: String,

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
pub struct CreateFileOutput {
    pub blocks: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_created: Option<String>,
}

pub async fn run(options: CreateFileOptions, global: crate::Global) -> Result<()> {
    let config = crate::llm::LmStudioConfig::from_env()
        .with_overrides(options.api_url.clone(), options.model.clone());
    let client = crate::llm::create_client()?;

    if global.verbose {
        eprintln!("Creating file: {}", options.path);
        eprintln!("Model: {}", config.model);
    }

    let output = create_file_data(&options.path, &options.description, &client, &config).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        super::print_document(&output.blocks);
        match &output.file_created {
            Some(path) => println!("{} {}", "Created".green().bold(), path),
            None => eprintln!("Model reply contained no code block; nothing was written"),
        }
    }

    Ok(())
}

/// Generate a new file from a description and write the first code block
/// to disk (shared by the CLI and the HTTP server).
///
/// Refuses to overwrite an existing path. `file_created` is `None` when
/// the model reply contained no code block.
pub async fn create_file_data(
    path: &str,
    description: &str,
    client: &reqwest::Client,
    config: &crate::llm::LmStudioConfig,
) -> Result<CreateFileOutput> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(eyre!("File already exists: {}", path));
    }

    let prompt = build_creation_prompt(path, description);
    let reply = crate::llm::ask(client, config, &prompt).await?;
    let blocks = extract(&reply);

    let file_created = match blocks.first_code() {
        Some(Segment::Code { content, .. }) => {
            write_code_file(Path::new(path), content).await?;
            Some(path.to_string())
        }
        _ => None,
    };

    Ok(CreateFileOutput {
        blocks,
        file_created,
    })
}

/// Write generated content, creating parent directories as needed.
pub async fn write_code_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create directory '{}': {}", parent.display(), e))?;
        }
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|e| eyre!("Failed to write file '{}': {}", path.display(), e))
}
