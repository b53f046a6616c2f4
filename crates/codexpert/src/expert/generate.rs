use crate::prelude::{eprintln, println, *};
use codexpert_core::blocks::{extract, Document};
use codexpert_core::prompt::build_generate_prompt;
use codexpert_core::types::GenerateRequest;
use serde::Serialize;

#[derive(Debug, clap::Parser)]
pub struct GenerateOptions {
    /// The task describing what code to generate
    pub prompt: String,

    /// Technology or framework context for the task
    #[clap(long)]
    pub technology: Option<String>,

    /// File path to include as context (repeatable)
    #[clap(long = "file")]
    pub context_files: Vec<String>,

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
pub struct GenerateOutput {
    pub blocks: Document,
    pub note: String,
}

pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    let config = crate::llm::LmStudioConfig::from_env()
        .with_overrides(options.api_url.clone(), options.model.clone());
    let client = crate::llm::create_client()?;

    if global.verbose {
        eprintln!("LM Studio URL: {}", config.api_url);
        eprintln!("Model: {}", config.model);
    }

    let files = super::read_context_files(&options.context_files, global.verbose).await;
    let request = GenerateRequest {
        prompt: options.prompt.clone(),
        technology: options.technology.clone(),
        files,
    };

    let output = generate_data(&request, &client, &config).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        super::print_document(&output.blocks);
    }

    Ok(())
}

/// Generate code blocks for a request (shared by the CLI and the HTTP server).
pub async fn generate_data(
    request: &GenerateRequest,
    client: &reqwest::Client,
    config: &crate::llm::LmStudioConfig,
) -> Result<GenerateOutput> {
    let prompt = build_generate_prompt(request);
    let reply = crate::llm::ask(client, config, &prompt).await?;

    Ok(GenerateOutput {
        blocks: extract(&reply),
        note: format!("Generated using LM Studio model {}", config.model),
    })
}
