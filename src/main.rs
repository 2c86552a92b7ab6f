// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use satis_sync::utils::logging::{self, format_error, format_info, format_success};
use satis_sync::{ManifestWriter, SyncConfig, SyncError, SyncOperation};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "satis_sync")]
#[command(version)]
#[command(about = "Rewrites satis.json from the repositories of a GitHub organization")]
#[command(
    long_about = "Fetches the repositories of the GitHub organization named in the environment \
                  and rewrites the Satis configuration file with one vcs entry per repository, \
                  each authenticated with the GitHub token. Run `satis build` afterwards to \
                  fetch updates from these repositories and build the Satis repository."
)]
struct Cli {
    /// Directory the output file and the default .env are resolved against
    #[arg(
        long,
        value_name = "DIR",
        default_value = ".",
        env = "SATIS_PROJECT_ROOT",
        global = true
    )]
    project_root: PathBuf,

    /// Load environment variables from this file instead of <project-root>/.env
    #[arg(long, value_name = "FILE", global = true)]
    env_file: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set, global = true)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the organization's repositories and rewrite the Satis configuration (default)
    Update {
        /// Print the manifest to stdout instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the resolved configuration with the token masked
    ShowConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::set_color(cli.color);
    logging::init_logger(cli.color, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_error(&format!("{:#}", err)));
            let code = err
                .downcast_ref::<SyncError>()
                .map(SyncError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = SyncConfig::load(&cli.project_root, cli.env_file.as_deref())
        .context("Failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Update { dry_run: false }) {
        Commands::Update { dry_run } => cmd_update(&config, dry_run).await,
        Commands::ShowConfig => cmd_show_config(&config),
    }
}

async fn cmd_update(config: &SyncConfig, dry_run: bool) -> Result<()> {
    let operation = SyncOperation::new(config)?;

    if dry_run {
        let manifest = operation
            .build_manifest()
            .await
            .context("Failed to fetch repositories")?;
        print!("{}", ManifestWriter::render(&manifest)?);
        info!(
            "Dry run: {} not modified",
            config.output_path.display()
        );
        return Ok(());
    }

    let report = operation.run().await.context("Satis configuration update failed")?;

    println!(
        "{}",
        format_success(&format!(
            "Satis configuration updated ({} repositories written to {} in {:.2}s)",
            report.repositories,
            report.output_path.display(),
            report.duration.as_secs_f64()
        ))
    );

    Ok(())
}

fn cmd_show_config(config: &SyncConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    println!(
        "{}",
        format_info(&format!(
            "Repositories are listed from {}/orgs/{}/repos",
            config.api_url, config.organization
        ))
    );
    Ok(())
}
