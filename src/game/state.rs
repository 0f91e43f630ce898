use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{
    action::Direction,
    grid::Grid,
    powerup::{ActiveEffects, PowerUp},
};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.opposite().delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(dx, dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position is covered by any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move the head one cell forward, growing if should_grow is true
    pub fn advance(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Drop up to `count` tail segments without going below `min_len`.
    /// Returns how many were removed.
    pub fn shrink(&mut self, count: usize, min_len: usize) -> usize {
        let target = self.body.len().saturating_sub(count).max(min_len);
        let removed = self.body.len().saturating_sub(target);
        self.body.truncate(self.body.len() - removed);
        removed
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True if two segments share a cell
    pub fn has_overlap(&self) -> bool {
        let unique: HashSet<&Position> = self.body.iter().collect();
        unique.len() != self.body.len()
    }
}

/// Category of food, deciding how much it is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Normal,
    Bonus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle
    Obstacle,
}

/// Complete game state, also handed out as the render snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Food,
    pub obstacles: HashSet<Position>,
    pub power_up: Option<PowerUp>,
    pub effects: ActiveEffects,
    pub score: u32,
    pub steps: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(grid: Grid, snake: Snake, food: Food, obstacles: HashSet<Position>) -> Self {
        Self {
            grid,
            snake,
            food,
            obstacles,
            power_up: None,
            effects: ActiveEffects::default(),
            score: 0,
            steps: 0,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.is_in_bounds(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    /// Every cell a new pickup must avoid
    pub fn occupied_cells(&self) -> HashSet<Position> {
        let mut occupied: HashSet<Position> = self.snake.body.iter().copied().collect();
        occupied.extend(self.obstacles.iter().copied());
        occupied.insert(self.food.position);
        if let Some(power_up) = self.power_up {
            occupied.insert(power_up.position);
        }
        occupied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.body,
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );

        let snake = Snake::new(Position::new(5, 5), Direction::Up, 2);
        assert_eq!(snake.body, vec![Position::new(5, 5), Position::new(5, 6)]);
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        // Move without growing
        snake.advance(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        // Move with growing
        snake.advance(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
    }

    #[test]
    fn test_shrink() {
        let mut snake = Snake::new(Position::new(10, 5), Direction::Right, 6);

        assert_eq!(snake.shrink(2, 3), 2);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(10, 5));

        assert_eq!(snake.shrink(2, 3), 1);
        assert_eq!(snake.len(), 3);

        assert_eq!(snake.shrink(2, 3), 0);
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_occupancy() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
        assert_eq!(snake.len(), 3);
        assert!(!snake.has_overlap());
    }

    #[test]
    fn test_occupied_cells() {
        let mut obstacles = HashSet::new();
        obstacles.insert(Position::new(0, 0));
        let mut state = GameState::new(
            Grid::new(20, 20),
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Food::new(Position::new(10, 10), FoodKind::Bonus),
            obstacles,
        );
        state.power_up = Some(PowerUp {
            position: Position::new(1, 1),
            kind: crate::game::powerup::PowerUpKind::Shrink,
        });

        let occupied = state.occupied_cells();
        assert_eq!(occupied.len(), 6);
        assert!(occupied.contains(&Position::new(10, 10)));
        assert!(occupied.contains(&Position::new(1, 1)));
    }
}
