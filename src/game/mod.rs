//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O or rendering dependencies:
//! movement, collisions, food, obstacles, power-ups and high-score ranking.

pub mod action;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod grid;
pub mod obstacles;
pub mod powerup;
pub mod scores;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, PowerUpConfig};
pub use difficulty::{DifficultyProfile, ObstacleLayout};
pub use engine::{GameEngine, GameOverCause, GameOverReport, Phase, TickInfo, TickOutcome};
pub use error::GameError;
pub use grid::Grid;
pub use powerup::{ActiveEffects, PowerUp, PowerUpKind};
pub use scores::{HighScoreTable, MAX_HIGH_SCORES};
pub use state::{CollisionType, Food, FoodKind, GameState, Position, Snake};
