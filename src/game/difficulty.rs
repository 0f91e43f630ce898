use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How obstacles are laid out when a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ObstacleLayout {
    /// Open board
    None,
    /// Row and column through the center, with a hole of `gap` cells around it
    Cross { gap: usize },
    /// Lattice of single blocks every `stride` cells
    Maze { stride: usize },
    /// `count` blocks scattered at random
    Random { count: usize },
}

/// A named difficulty tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub name: String,
    /// Base delay between ticks
    pub tick_interval_ms: u64,
    pub layout: ObstacleLayout,
}

impl DifficultyProfile {
    pub fn new(name: impl Into<String>, tick_interval_ms: u64, layout: ObstacleLayout) -> Self {
        Self {
            name: name.into(),
            tick_interval_ms,
            layout,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Built-in tiers
    pub fn presets() -> Vec<DifficultyProfile> {
        vec![
            Self::new("easy", 150, ObstacleLayout::None),
            Self::new("medium", 100, ObstacleLayout::Cross { gap: 3 }),
            Self::new("hard", 70, ObstacleLayout::Maze { stride: 4 }),
            Self::new("insane", 60, ObstacleLayout::Random { count: 24 }),
        ]
    }
}

/// Look a tier up by name, ignoring ASCII case
pub fn find_profile<'a>(
    profiles: &'a [DifficultyProfile],
    name: &str,
) -> Option<&'a DifficultyProfile> {
    profiles
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(name))
}
