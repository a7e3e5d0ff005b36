mod command;
mod run;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use command::{Cli, Subcommands};

#[tokio::main]
async fn main() -> ExitCode {
    // a missing .env is normal outside local development
    let dotenv = dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match &cli.subcommand {
        Subcommands::Run(run_args) => run::run(run_args, dotenv).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("fleetgate: {e:#}");
            ExitCode::FAILURE
        }
    }
}
