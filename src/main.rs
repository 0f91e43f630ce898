use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use powersnake::game::{GameConfig, GameEngine, HighScoreTable};
use powersnake::logging::init_logging;
use powersnake::modes::{HumanMode, ScoresMode};
use powersnake::persistence::{load_high_scores, DEFAULT_SCORES_FILE};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "powersnake")]
#[command(version, about = "Snake with difficulty tiers, obstacles and power-ups")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Difficulty highlighted in the menu (e.g. easy, medium, hard, insane)
    #[arg(long)]
    difficulty: Option<String>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// JSON file with game settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where high scores are kept
    #[arg(long, default_value = DEFAULT_SCORES_FILE)]
    scores: PathBuf,

    /// Fixed random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (filter with RUST_LOG)
    #[arg(long, default_value = "powersnake.log")]
    log_file: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard or mouse
    Play,
    /// Print the saved high scores
    Scores,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    // Configuration: file, then CLI overrides
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(difficulty) = &cli.difficulty {
        config.default_difficulty = difficulty.clone();
    }
    config
        .validate()
        .map_err(|msg| anyhow!("Invalid configuration: {}", msg))?;

    // An unreadable file is left alone rather than overwritten
    let (high_scores, scores_path) = match load_high_scores(&cli.scores) {
        Ok(table) => (table, Some(cli.scores)),
        Err(err) => {
            warn!("Ignoring unreadable high scores, they will not be saved: {:#}", err);
            (HighScoreTable::new(), None)
        }
    };

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let engine = GameEngine::new(config)?.with_high_scores(high_scores);
            let mut human_mode = HumanMode::new(engine, scores_path);
            human_mode.run().await?;
        }
        Mode::Scores => {
            ScoresMode::new(&high_scores, &config.difficulties).run();
        }
    }

    Ok(())
}
