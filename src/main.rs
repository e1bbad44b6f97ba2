//! Threadrun CLI binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use threadrun::cli::commands::{
    client_from_env, handle_ask, handle_cancel, handle_messages, handle_run, handle_transcribe,
};
use threadrun::cli::{Cli, Commands};
use threadrun::threads::Assistants;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "threadrun=debug" } else { "threadrun=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = match client_from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let assistants = Assistants::new(client.clone());

    let result = match cli.command {
        Commands::Ask(args) => handle_ask(&client, args).await,
        Commands::Transcribe(args) => handle_transcribe(&client, args).await,
        Commands::Run(args) => handle_run(&assistants, args).await,
        Commands::Messages(args) => handle_messages(&assistants, args).await,
        Commands::Cancel(args) => handle_cancel(&assistants, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
