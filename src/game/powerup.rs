use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    config::GameConfig,
    state::{GameState, Position},
};

/// Category of a power-up pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerUpKind {
    /// Temporarily shortens the tick interval
    Speed,
    /// Flat score bonus
    BonusPoints,
    /// Drops tail segments
    Shrink,
    /// Absorbs fatal collisions for a while
    Invincibility,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Speed,
        PowerUpKind::BonusPoints,
        PowerUpKind::Shrink,
        PowerUpKind::Invincibility,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::BonusPoints => "bonus points",
            PowerUpKind::Shrink => "shrink",
            PowerUpKind::Invincibility => "invincibility",
        }
    }

    /// Apply the pickup to the running game
    pub fn apply(self, state: &mut GameState, config: &GameConfig) {
        let tuning = &config.power_ups;
        match self {
            PowerUpKind::Speed => {
                state.effects.speed = Some(Duration::from_millis(tuning.speed_duration_ms));
            }
            PowerUpKind::BonusPoints => {
                state.score += tuning.bonus_points;
            }
            PowerUpKind::Shrink => {
                state
                    .snake
                    .shrink(tuning.shrink_amount, config.initial_snake_length);
            }
            PowerUpKind::Invincibility => {
                state.effects.invincibility =
                    Some(Duration::from_millis(tuning.invincibility_duration_ms));
            }
        }
    }

    /// Undo a timed effect. Instant effects have nothing to undo.
    pub fn revert(self, state: &mut GameState) {
        match self {
            PowerUpKind::Speed => state.effects.speed = None,
            PowerUpKind::Invincibility => state.effects.invincibility = None,
            PowerUpKind::BonusPoints | PowerUpKind::Shrink => {}
        }
    }
}

/// A power-up lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
}

/// Remaining time of each timed effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    pub speed: Option<Duration>,
    pub invincibility: Option<Duration>,
}

impl ActiveEffects {
    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_some()
    }

    pub fn is_sped_up(&self) -> bool {
        self.speed.is_some()
    }

    /// Active timed effects with their remaining time
    pub fn active(&self) -> Vec<(PowerUpKind, Duration)> {
        let mut active = Vec::new();
        if let Some(left) = self.speed {
            active.push((PowerUpKind::Speed, left));
        }
        if let Some(left) = self.invincibility {
            active.push((PowerUpKind::Invincibility, left));
        }
        active
    }

    /// Count down every timer by `elapsed` and report the ones that ran out.
    ///
    /// Expired effects stay set until the caller reverts them.
    pub fn tick_down(&mut self, elapsed: Duration) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();

        for (kind, slot) in [
            (PowerUpKind::Speed, &mut self.speed),
            (PowerUpKind::Invincibility, &mut self.invincibility),
        ] {
            if let Some(left) = slot {
                *left = left.saturating_sub(elapsed);
                if left.is_zero() {
                    expired.push(kind);
                }
            }
        }

        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        action::Direction,
        grid::Grid,
        state::{Food, FoodKind, Snake},
    };
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn state_with_length(length: usize) -> GameState {
        GameState::new(
            Grid::new(20, 20),
            Snake::new(Position::new(10, 5), Direction::Right, length),
            Food::new(Position::new(15, 15), FoodKind::Normal),
            HashSet::new(),
        )
    }

    #[test]
    fn test_bonus_points_is_instant() {
        let config = GameConfig::default();
        let mut state = state_with_length(3);

        PowerUpKind::BonusPoints.apply(&mut state, &config);

        assert_eq!(state.score, config.power_ups.bonus_points);
        assert_eq!(state.effects, ActiveEffects::default());
    }

    #[test]
    fn test_shrink_removes_tail_segments() {
        let config = GameConfig::default();
        let mut state = state_with_length(7);

        PowerUpKind::Shrink.apply(&mut state, &config);

        assert_eq!(state.snake.len(), 7 - config.power_ups.shrink_amount);
        assert_eq!(state.snake.head(), Position::new(10, 5));
    }

    #[test]
    fn test_shrink_clamps_at_initial_length() {
        let config = GameConfig::default();

        let min = config.initial_snake_length;

        // One segment above the minimum: only that one goes
        let mut state = state_with_length(min + 1);
        PowerUpKind::Shrink.apply(&mut state, &config);
        assert_eq!(state.snake.len(), min);

        // Already at the minimum: untouched
        let mut state = state_with_length(min);
        PowerUpKind::Shrink.apply(&mut state, &config);
        assert_eq!(state.snake.len(), min);
    }

    #[test]
    fn test_timed_effects_apply_and_revert() {
        let config = GameConfig::default();
        let mut state = state_with_length(3);

        PowerUpKind::Speed.apply(&mut state, &config);
        PowerUpKind::Invincibility.apply(&mut state, &config);
        assert!(state.effects.is_sped_up());
        assert!(state.effects.is_invincible());

        PowerUpKind::Speed.revert(&mut state);
        assert!(!state.effects.is_sped_up());
        assert!(state.effects.is_invincible());

        PowerUpKind::Invincibility.revert(&mut state);
        assert_eq!(state.effects, ActiveEffects::default());
    }

    #[test]
    fn test_tick_down_reports_expiry() {
        let mut effects = ActiveEffects {
            speed: Some(Duration::from_millis(150)),
            invincibility: Some(Duration::from_millis(400)),
        };

        assert!(effects.tick_down(Duration::from_millis(100)).is_empty());
        assert_eq!(
            effects.tick_down(Duration::from_millis(100)),
            vec![PowerUpKind::Speed]
        );
        assert_eq!(effects.invincibility, Some(Duration::from_millis(200)));

        assert_eq!(
            effects.tick_down(Duration::from_millis(500)),
            vec![PowerUpKind::Speed, PowerUpKind::Invincibility]
        );
    }

    #[test]
    fn test_random_kind_covers_all() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: HashSet<PowerUpKind> = (0..200).map(|_| PowerUpKind::random(&mut rng)).collect();
        assert_eq!(seen.len(), PowerUpKind::ALL.len());
    }
}
