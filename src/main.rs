//! commit-helper - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commit_helper::git::check_git_installed;
use commit_helper::{
    CommitOrchestrator, GeneratorConfig, GitCommands, OpenAiGenerator, RepositoryInspector,
    SystemGit,
};

/// Commit each changed file separately with an AI-generated message.
#[derive(Parser, Debug)]
#[command(name = "commit-helper")]
#[command(about = "Commit each changed file separately with an AI-generated message")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let commands = GitCommands::default();

    // Step 1: Check prerequisites
    check_git_installed(&commands.program)?;

    let git = SystemGit::discover(commands.program.clone())
        .context("Run commit-helper from within a git repository")?;

    // Step 2: Classify the working tree before touching anything
    let inspector = RepositoryInspector::new(&git, commands, git.workdir());
    let classification = inspector
        .classify()
        .context("Error getting modified, new or deleted files")?;

    if classification.is_empty() {
        println!("Nothing to commit, working tree clean.");
        return Ok(());
    }

    println!(
        "Found {} modified, {} new and {} deleted file(s)",
        classification.modified.len(),
        classification.new.len(),
        classification.deleted.len()
    );

    // Step 3: One commit per file
    let config = GeneratorConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!(
            "OPENAI_API_KEY is not set; only deletions can be committed (with fallback messages)"
        );
    }
    let generator =
        OpenAiGenerator::new(config).context("Failed to initialize the OpenAI client")?;

    let report = CommitOrchestrator::new(&inspector, &generator)
        .run(&classification)
        .await;

    println!("{}", report.summary());
    if report.has_failures() {
        tracing::warn!(
            "{} file(s) were left uncommitted; see the errors above",
            report.failed.len()
        );
    }
    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the level picked from `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
