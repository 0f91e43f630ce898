use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, error, info, trace};

use super::{
    action::Direction,
    config::GameConfig,
    difficulty::DifficultyProfile,
    error::GameError,
    obstacles,
    powerup::{PowerUp, PowerUpKind},
    scores::HighScoreTable,
    state::{CollisionType, Food, FoodKind, GameState, Position},
};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a session to start
    Ready,
    Running,
    /// Session ended; score is frozen until the next start
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    Collision(CollisionType),
    /// No free cell was left to respawn food
    BoardFull,
}

/// What happened during a tick that did not end the game
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInfo {
    /// Food eaten this tick
    pub ate_food: Option<FoodKind>,
    /// Power-up collected this tick
    pub collected: Option<PowerUpKind>,
    /// Power-up that appeared on the board this tick
    pub spawned: Option<PowerUpKind>,
    /// Timed effects that ran out at the start of this tick
    pub expired: Vec<PowerUpKind>,
    /// Collision swallowed by invincibility; the snake held still
    pub absorbed: Option<CollisionType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOverReport {
    pub final_score: u32,
    pub cause: GameOverCause,
    pub difficulty: String,
    /// Place reached in the difficulty's high-score table, 1-based
    pub rank: Option<usize>,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No session is running
    Idle,
    Advanced { info: TickInfo, snapshot: GameState },
    GameOver(GameOverReport),
}

/// The game engine that owns the session and applies all rules
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    profile: DifficultyProfile,
    phase: Phase,
    state: GameState,
    pending_direction: Option<Direction>,
    high_scores: HighScoreTable,
}

impl GameEngine {
    /// Create an engine in the `Ready` phase using the configured default difficulty
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate().map_err(GameError::InvalidConfig)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let profile = config
            .profile(&config.default_difficulty)
            .cloned()
            .ok_or_else(|| GameError::InvalidDifficulty(config.default_difficulty.clone()))?;
        let state = build_board(&config, &profile, &mut rng)?;

        Ok(Self {
            config,
            rng,
            profile,
            phase: Phase::Ready,
            state,
            pending_direction: None,
            high_scores: HighScoreTable::new(),
        })
    }

    /// Seed the engine with previously saved high scores
    pub fn with_high_scores(mut self, high_scores: HighScoreTable) -> Self {
        self.high_scores = high_scores;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of the board for renderers
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn profiles(&self) -> &[DifficultyProfile] {
        &self.config.difficulties
    }

    /// Scores for a tier, matched the same way `start_session` matches names
    pub fn high_scores(&self, difficulty: &str) -> &[u32] {
        let tier = self
            .config
            .profile(difficulty)
            .map_or(difficulty, |profile| profile.name.as_str());
        self.high_scores.scores(tier)
    }

    pub fn high_score_table(&self) -> &HighScoreTable {
        &self.high_scores
    }

    /// Delay before the next tick: the tier's base interval, shortened while sped up
    pub fn tick_interval(&self) -> Duration {
        let base = self.profile.tick_interval();
        if self.state.effects.is_sped_up() {
            base.mul_f64(self.config.power_ups.speed_factor)
                .max(Duration::from_millis(1))
        } else {
            base
        }
    }

    /// Choose the tier for the next session without starting it
    pub fn select_difficulty(&mut self, name: &str) -> Result<(), GameError> {
        if self.phase == Phase::Running {
            return Err(GameError::SessionInProgress);
        }
        self.profile = self
            .config
            .profile(name)
            .cloned()
            .ok_or_else(|| GameError::InvalidDifficulty(name.to_string()))?;
        Ok(())
    }

    /// Start a fresh session on the named tier
    pub fn start_session(&mut self, name: &str) -> Result<(), GameError> {
        self.select_difficulty(name)?;

        self.state = build_board(&self.config, &self.profile, &mut self.rng)?;
        self.pending_direction = None;
        self.phase = Phase::Running;

        info!(
            difficulty = %self.profile.name,
            obstacles = self.state.obstacles.len(),
            "session started"
        );
        Ok(())
    }

    /// Start again on the current tier, abandoning any running session
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.reset();
        let name = self.profile.name.clone();
        self.start_session(&name)
    }

    /// Back to `Ready`. A running session is dropped without recording its score.
    pub fn reset(&mut self) {
        self.phase = Phase::Ready;
        self.pending_direction = None;
    }

    /// Queue a turn for the next tick; the latest request wins
    pub fn request_direction(&mut self, direction: Direction) {
        if self.phase != Phase::Running {
            trace!(?direction, "direction ignored, no session running");
            return;
        }
        if self.state.snake.direction.is_opposite(direction) {
            trace!(?direction, "reverse direction ignored");
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Advance the session by one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        let mut info = TickInfo::default();

        let elapsed = self.tick_interval();
        for kind in self.state.effects.tick_down(elapsed) {
            kind.revert(&mut self.state);
            debug!(effect = kind.label(), "power-up expired");
            info.expired.push(kind);
        }

        if let Some(direction) = self.pending_direction.take() {
            if !self.state.snake.direction.is_opposite(direction) {
                self.state.snake.direction = direction;
            }
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);

        if let Some(collision) = self.check_collision(new_head) {
            if !self.state.effects.is_invincible() {
                return self.game_over(GameOverCause::Collision(collision));
            }
            debug!(?collision, "collision absorbed by invincibility");
            info.absorbed = Some(collision);
        } else {
            let ate_food = new_head == self.state.food.position;
            self.state.snake.advance(ate_food);

            if ate_food {
                let kind = self.state.food.kind;
                self.state.score += self.food_value(kind);
                info.ate_food = Some(kind);
                debug!(?kind, score = self.state.score, "food eaten");

                match self.spawn_food() {
                    Ok(food) => self.state.food = food,
                    Err(err) => {
                        error!(%err, "cannot respawn food");
                        return self.game_over(GameOverCause::BoardFull);
                    }
                }
            }

            if let Some(power_up) = self.state.power_up {
                if power_up.position == new_head {
                    self.state.power_up = None;
                    power_up.kind.apply(&mut self.state, &self.config);
                    info.collected = Some(power_up.kind);
                    debug!(effect = power_up.kind.label(), "power-up collected");
                }
            }
        }

        info.spawned = self.maybe_spawn_power_up();
        self.state.steps += 1;

        TickOutcome::Advanced {
            info,
            snapshot: self.state.clone(),
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it only moves after the head has landed
        if self.state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        if self.state.obstacles.contains(&pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    fn game_over(&mut self, cause: GameOverCause) -> TickOutcome {
        self.phase = Phase::GameOver;
        self.pending_direction = None;

        let final_score = self.state.score;
        let rank = self.high_scores.record(&self.profile.name, final_score);

        info!(
            difficulty = %self.profile.name,
            score = final_score,
            ?cause,
            ?rank,
            "game over"
        );

        TickOutcome::GameOver(GameOverReport {
            final_score,
            cause,
            difficulty: self.profile.name.clone(),
            rank,
        })
    }

    fn food_value(&self, kind: FoodKind) -> u32 {
        match kind {
            FoodKind::Normal => self.config.food_value,
            FoodKind::Bonus => self.config.bonus_food_value,
        }
    }

    /// Place new food away from snake, obstacles and any power-up
    fn spawn_food(&mut self) -> Result<Food, GameError> {
        let occupied = self.state.occupied_cells();
        let position = self.state.grid.place_random(&mut self.rng, &occupied)?;
        Ok(Food::new(
            position,
            random_food_kind(&self.config, &mut self.rng),
        ))
    }

    fn maybe_spawn_power_up(&mut self) -> Option<PowerUpKind> {
        if self.state.power_up.is_some() {
            return None;
        }
        if !self.rng.gen_bool(self.config.power_ups.spawn_chance) {
            return None;
        }

        let occupied = self.state.occupied_cells();
        match self.state.grid.place_random(&mut self.rng, &occupied) {
            Ok(position) => {
                let kind = PowerUpKind::random(&mut self.rng);
                self.state.power_up = Some(PowerUp { position, kind });
                debug!(effect = kind.label(), x = position.x, y = position.y, "power-up spawned");
                Some(kind)
            }
            Err(err) => {
                debug!(%err, "no room for a power-up");
                None
            }
        }
    }
}

fn random_food_kind<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> FoodKind {
    if rng.gen_bool(config.bonus_food_chance) {
        FoodKind::Bonus
    } else {
        FoodKind::Normal
    }
}

/// Fresh board for a session: starting snake, the tier's obstacles, then food
fn build_board<R: Rng + ?Sized>(
    config: &GameConfig,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Result<GameState, GameError> {
    let grid = config.grid();
    let snake = config.initial_snake();
    let obstacles = obstacles::generate(profile.layout, &grid, &snake, config.spawn_clearance, rng)?;

    let mut occupied = obstacles.clone();
    occupied.extend(snake.body.iter().copied());
    let food = Food::new(grid.place_random(rng, &occupied)?, random_food_kind(config, rng));

    Ok(GameState::new(grid, snake, food, obstacles))
}
