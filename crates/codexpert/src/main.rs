#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod error;
mod expert;
mod llm;
mod prelude;
mod serve;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Local LLM code expert: generate code, analyze codebases, and scaffold files through LM Studio"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "CODEXPERT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate code from a prompt with optional file context
    Generate(crate::expert::generate::GenerateOptions),

    /// Analyze a codebase directory and answer a query about it
    Analyze(crate::expert::analyze::AnalyzeOptions),

    /// Create a new file from a description
    New(crate::expert::create_file::CreateFileOptions),

    /// Run the HTTP API server
    Serve(crate::serve::ServeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Generate(options) => crate::expert::generate::run(options, app.global).await,
        SubCommands::Analyze(options) => crate::expert::analyze::run(options, app.global).await,
        SubCommands::New(options) => crate::expert::create_file::run(options, app.global).await,
        SubCommands::Serve(options) => crate::serve::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
