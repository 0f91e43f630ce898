use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{
    action::Direction,
    difficulty::{find_profile, DifficultyProfile, ObstacleLayout},
    grid::Grid,
    state::{Position, Snake},
};

/// Tuning of the power-up system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    /// Chance per tick that a power-up appears when none is on the board
    pub spawn_chance: f64,
    /// Tick interval multiplier while the speed effect lasts
    pub speed_factor: f64,
    pub speed_duration_ms: u64,
    pub bonus_points: u32,
    /// Tail segments removed by a shrink pickup
    pub shrink_amount: usize,
    pub invincibility_duration_ms: u64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.02,
            speed_factor: 0.5,
            speed_duration_ms: 5000,
            bonus_points: 10,
            shrink_amount: 2,
            invincibility_duration_ms: 5000,
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake, also the floor for shrinking
    pub initial_snake_length: usize,
    /// Where the head starts
    pub start_position: Position,
    pub initial_direction: Direction,

    // Food
    pub food_value: u32,
    pub bonus_food_value: u32,
    /// Probability that a freshly spawned food is the bonus kind
    pub bonus_food_chance: f64,

    /// Cells kept free of obstacles straight ahead of the starting head
    pub spawn_clearance: usize,

    pub power_ups: PowerUpConfig,

    /// Tier used when none is named
    pub default_difficulty: String,
    pub difficulties: Vec<DifficultyProfile>,

    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            start_position: Position::new(5, 5),
            initial_direction: Direction::Right,
            food_value: 1,
            bonus_food_value: 5,
            bonus_food_chance: 0.2,
            spawn_clearance: 6,
            power_ups: PowerUpConfig::default(),
            default_difficulty: "medium".to_string(),
            difficulties: DifficultyProfile::presets(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// The snake every session starts with
    pub fn initial_snake(&self) -> Snake {
        Snake::new(
            self.start_position,
            self.initial_direction,
            self.initial_snake_length,
        )
    }

    pub fn profile(&self, name: &str) -> Option<&DifficultyProfile> {
        find_profile(&self.difficulties, name)
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err` with a human readable message for the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        let grid = self.grid();
        let snake = self.initial_snake();
        if let Some(outside) = snake.body.iter().find(|p| !grid.is_in_bounds(**p)) {
            return Err(format!(
                "initial snake does not fit the grid: segment ({}, {}) is outside",
                outside.x, outside.y
            ));
        }
        // Room for the snake plus one food
        if snake.len() >= grid.capacity() {
            return Err("initial snake leaves no room for food".to_string());
        }

        for (name, chance) in [
            ("bonus_food_chance", self.bonus_food_chance),
            ("power_ups.spawn_chance", self.power_ups.spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(format!("{} must be in [0, 1], got {}", name, chance));
            }
        }

        if !(self.power_ups.speed_factor > 0.0 && self.power_ups.speed_factor <= 1.0) {
            return Err(format!(
                "power_ups.speed_factor must be in (0, 1], got {}",
                self.power_ups.speed_factor
            ));
        }

        if self.difficulties.is_empty() {
            return Err("at least one difficulty is required".to_string());
        }

        let mut names = HashSet::new();
        for profile in &self.difficulties {
            if !names.insert(profile.name.to_ascii_lowercase()) {
                return Err(format!("duplicate difficulty '{}'", profile.name));
            }
            if profile.tick_interval_ms == 0 {
                return Err(format!(
                    "difficulty '{}' needs a positive tick interval",
                    profile.name
                ));
            }
            match profile.layout {
                ObstacleLayout::Maze { stride } if stride < 2 => {
                    return Err(format!(
                        "difficulty '{}': maze stride must be at least 2",
                        profile.name
                    ));
                }
                ObstacleLayout::Random { count }
                    if count + snake.len() + self.spawn_clearance >= grid.capacity() =>
                {
                    return Err(format!(
                        "difficulty '{}': {} obstacles do not fit the grid",
                        profile.name, count
                    ));
                }
                _ => {}
            }
        }

        if self.profile(&self.default_difficulty).is_none() {
            return Err(format!(
                "default difficulty '{}' is not defined",
                self.default_difficulty
            ));
        }

        Ok(())
    }
}
