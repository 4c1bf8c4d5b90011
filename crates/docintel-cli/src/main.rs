//! docintel CLI - Summarize, review and question PDF and DOCX documents.

use clap::Parser;
use docintel_cli::commands;
use docintel_cli::repl;
use docintel_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run() -> docintel_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
        Command::Summarize(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            commands::execute_summarize(args, &pipeline, &formatter).await?;
        }
        Command::Review(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            commands::execute_review(args, &pipeline, &formatter).await?;
        }
        Command::Ask(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            commands::execute_ask(args, &pipeline, &formatter).await?;
        }
        Command::Chat(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            repl::run_chat(&args.file, &pipeline, &config, &formatter).await?;
        }
    }

    Ok(())
}
