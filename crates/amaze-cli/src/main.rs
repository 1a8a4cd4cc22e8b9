mod cli;
mod commands;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Validate { level, max_states } => {
            let solvable = commands::validate(&level, max_states)?;
            return Ok(if solvable {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            });
        }
        Command::Generate {
            width,
            height,
            density,
            max_attempts,
            seed,
            color,
            out,
        } => commands::generate(commands::GenerateArgs {
            width,
            height,
            density,
            max_attempts,
            seed,
            color,
            out,
        })?,
        Command::Play { level, moves } => commands::play(&level, &moves)?,
        Command::Show { level } => commands::show(&level)?,
    }
    Ok(ExitCode::SUCCESS)
}
