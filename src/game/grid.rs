use std::collections::HashSet;

use rand::Rng;

use super::{error::GameError, state::Position};

/// The fixed-size board every entity lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Total number of cells
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Iterate every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Pick a uniformly random cell that is not in `occupied`.
    ///
    /// Fails up front when every in-bounds cell is taken, so the sampling
    /// loop below always has at least one cell to hit.
    pub fn place_random<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupied: &HashSet<Position>,
    ) -> Result<Position, GameError> {
        let capacity = self.capacity();
        let taken = occupied.iter().filter(|p| self.is_in_bounds(**p)).count();
        if taken >= capacity {
            return Err(GameError::PlacementExhausted {
                occupied: taken,
                capacity,
            });
        }

        loop {
            let x = rng.gen_range(0..self.width) as i32;
            let y = rng.gen_range(0..self.height) as i32;
            let pos = Position::new(x, y);

            if !occupied.contains(&pos) {
                return Ok(pos);
            }
        }
    }
}
