use amaze_core::{
    Direction, Generator, GeneratorConfig, LevelData, PaintColor, PlaySession, Validator,
    ValidatorConfig,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::render;

pub fn load_level(path: &Path) -> Result<LevelData> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading level {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing level {}", path.display()))
}

/// Returns whether the level is solvable
pub fn validate(path: &Path, max_states: Option<usize>) -> Result<bool> {
    let grid = load_level(path)?.into_grid()?;
    let validator = Validator::with_config(ValidatorConfig {
        max_states,
        ..Default::default()
    });
    let report = validator.validate(&grid);
    println!("{}", render::describe_report(&report));
    Ok(report.solvable)
}

pub struct GenerateArgs {
    pub width: usize,
    pub height: usize,
    pub density: f64,
    pub max_attempts: usize,
    pub seed: Option<u64>,
    pub color: String,
    pub out: Option<PathBuf>,
}

pub fn generate(args: GenerateArgs) -> Result<()> {
    let config = GeneratorConfig {
        width: args.width,
        height: args.height,
        density: args.density,
        max_attempts: args.max_attempts,
        ..Default::default()
    };
    let mut generator = match args.seed {
        Some(seed) => Generator::with_config_and_seed(config, seed),
        None => Generator::with_config(config),
    };
    let grid = generator.generate_with_config()?;
    let level = LevelData::from_grid(&grid, PaintColor::new(args.color));
    let json = serde_json::to_string_pretty(&level)?;

    match args.out {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            log::info!("level written to {}", path.display());
            print!("{}", grid);
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn play(path: &Path, moves: &str) -> Result<()> {
    let directions = Direction::parse_sequence(moves)?;
    let mut session = PlaySession::from_level(&load_level(path)?)?;

    for direction in directions {
        let outcome = session.apply_move(direction);
        println!("{}", render::describe_move(&outcome));
    }
    print!("{}", render::render_session(&session));
    println!(
        "{} moves, {}% painted{}",
        session.total_moves(),
        session.coverage().percent(),
        if session.is_complete() {
            ", level complete"
        } else if !session.can_still_complete() {
            ", no longer solvable"
        } else {
            ""
        }
    );
    Ok(())
}

pub fn show(path: &Path) -> Result<()> {
    let level = load_level(path)?;
    let color = level.start_color.clone();
    let grid = level.into_grid()?;
    println!("{}x{}, colour {}", grid.width(), grid.height(), color);
    print!("{}", grid);
    Ok(())
}
