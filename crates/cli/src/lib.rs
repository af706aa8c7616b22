pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "bazar",
    about = "Bazar operator CLI",
    long_about = "Operate the bazar storefront service: store migrations, demo catalog seeding, and readiness checks.",
    after_help = "Examples:\n  bazar migrate\n  bazar seed\n  bazar doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending store migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo catalog (idempotent upsert)")]
    Seed,
    #[command(about = "Validate configuration and store connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
