//! Obstacle layouts generated at session start

use std::collections::HashSet;

use rand::Rng;

use super::{
    difficulty::ObstacleLayout,
    error::GameError,
    grid::Grid,
    state::{Position, Snake},
};

/// Cells no layout may use: the snake itself and a lane ahead of its head
pub fn spawn_area(grid: &Grid, snake: &Snake, clearance: usize) -> HashSet<Position> {
    let mut reserved: HashSet<Position> = snake.body.iter().copied().collect();

    let mut cell = snake.head();
    for _ in 0..clearance {
        cell = cell.moved_in_direction(snake.direction);
        if !grid.is_in_bounds(cell) {
            break;
        }
        reserved.insert(cell);
    }

    reserved
}

/// Build the obstacle set for `layout`, keeping the spawn area clear
pub fn generate<R: Rng + ?Sized>(
    layout: ObstacleLayout,
    grid: &Grid,
    snake: &Snake,
    clearance: usize,
    rng: &mut R,
) -> Result<HashSet<Position>, GameError> {
    let reserved = spawn_area(grid, snake, clearance);
    let keep = |pos: &Position| !reserved.contains(pos);

    let obstacles = match layout {
        ObstacleLayout::None => HashSet::new(),
        ObstacleLayout::Cross { gap } => {
            let center = grid.center();
            let gap = gap as i32;
            let row = (0..grid.width as i32)
                .filter(|x| (x - center.x).abs() > gap)
                .map(|x| Position::new(x, center.y));
            let column = (0..grid.height as i32)
                .filter(|y| (y - center.y).abs() > gap)
                .map(|y| Position::new(center.x, y));
            row.chain(column).filter(keep).collect()
        }
        ObstacleLayout::Maze { stride } => {
            let stride = stride.max(1) as i32;
            let offset = stride / 2;
            grid.cells()
                .filter(|p| p.x % stride == offset && p.y % stride == offset)
                .filter(keep)
                .collect()
        }
        ObstacleLayout::Random { count } => {
            let mut occupied = reserved.clone();
            let mut obstacles = HashSet::with_capacity(count);
            for _ in 0..count {
                let pos = grid.place_random(rng, &occupied)?;
                occupied.insert(pos);
                obstacles.insert(pos);
            }
            obstacles
        }
    };

    Ok(obstacles)
}
