use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Level tool for the Amaze sliding-ball puzzle
#[derive(Debug, Parser)]
#[command(name = "amaze", version, about)]
pub struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether a level can be fully painted
    Validate {
        /// Level file (JSON)
        level: PathBuf,
        /// Stop the search after this many states
        #[arg(long)]
        max_states: Option<usize>,
    },
    /// Generate a random solvable level
    Generate {
        #[arg(long, default_value_t = 10)]
        width: usize,
        #[arg(long, default_value_t = 10)]
        height: usize,
        /// Fraction of cells turned into walls
        #[arg(long, default_value_t = 0.3)]
        density: f64,
        #[arg(long, default_value_t = 500)]
        max_attempts: usize,
        /// Seed for a reproducible level
        #[arg(long)]
        seed: Option<u64>,
        /// Paint colour stored with the level
        #[arg(long, default_value = "none")]
        color: String,
        /// Write the level here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Play a sequence of moves on a level
    Play {
        level: PathBuf,
        /// Moves as letters, e.g. RRUL
        #[arg(short, long)]
        moves: String,
    },
    /// Print a level as a text map
    Show { level: PathBuf },
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["amaze", "generate", "--seed", "4"]).unwrap();
        match cli.command {
            Command::Generate {
                width,
                height,
                density,
                max_attempts,
                seed,
                out,
                ..
            } => {
                assert_eq!((width, height), (10, 10));
                assert_eq!(density, 0.3);
                assert_eq!(max_attempts, 500);
                assert_eq!(seed, Some(4));
                assert!(out.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["amaze", "-vv", "show", "level.json"]).unwrap();
        assert_eq!(cli.log_filter(), "debug");
        let cli = Cli::try_parse_from(["amaze", "show", "level.json"]).unwrap();
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_play_requires_moves() {
        assert!(Cli::try_parse_from(["amaze", "play", "level.json"]).is_err());
    }
}
