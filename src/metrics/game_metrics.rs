use std::time::{Duration, Instant};

use crate::game::TickInfo;

/// Per-run counters shown next to the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub foods_eaten: u32,
    pub power_ups_collected: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            foods_eaten: 0,
            power_ups_collected: 0,
            running: false,
        }
    }

    /// Refresh the clock; it stands still between games
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.foods_eaten = 0;
        self.power_ups_collected = 0;
        self.running = true;
    }

    pub fn on_tick(&mut self, info: &TickInfo) {
        if info.ate_food.is_some() {
            self.foods_eaten += 1;
        }
        if info.collected.is_some() {
            self.power_ups_collected += 1;
        }
    }

    pub fn on_game_over(&mut self) {
        self.update();
        self.running = false;
        self.games_played += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FoodKind, PowerUpKind};

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_counters() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();

        metrics.on_tick(&TickInfo {
            ate_food: Some(FoodKind::Normal),
            ..Default::default()
        });
        metrics.on_tick(&TickInfo {
            collected: Some(PowerUpKind::Shrink),
            ..Default::default()
        });
        metrics.on_tick(&TickInfo::default());

        assert_eq!(metrics.foods_eaten, 1);
        assert_eq!(metrics.power_ups_collected, 1);

        metrics.on_game_over();
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_start();
        assert_eq!(metrics.foods_eaten, 0);
        assert_eq!(metrics.games_played, 1);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_clock_stops_after_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        metrics.on_game_over();
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }
}
