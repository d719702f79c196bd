use std::collections::HashSet;

use log::warn;
use rand::Rng;

use super::geometry::GridGeometry;
use super::state::Cell;

/// Default number of random draws before scanning the board
pub const DEFAULT_RETRY_LIMIT: usize = 1000;

/// Chooses a free cell for the next piece of food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodPlacer {
    retry_limit: usize,
}

impl FoodPlacer {
    pub fn new(retry_limit: usize) -> Self {
        Self { retry_limit }
    }

    /// Pick a uniformly random cell that is not in `occupied`.
    ///
    /// Rejection sampling runs for at most `retry_limit` draws; after that the
    /// board is scanned row by row and the first free cell wins. Returns
    /// `None` only when every cell is occupied.
    pub fn place<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        board: &GridGeometry,
        occupied: &HashSet<Cell>,
    ) -> Option<Cell> {
        for _ in 0..self.retry_limit {
            let cell = Cell::new(
                rng.gen_range(0..board.columns()),
                rng.gen_range(0..board.rows()),
            );

            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }

        let fallback = board.cells().find(|cell| !occupied.contains(cell));
        if fallback.is_none() {
            warn!(
                "no free cell left on a {}x{} board",
                board.columns(),
                board.rows()
            );
        }
        fallback
    }
}

impl Default for FoodPlacer {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_LIMIT)
    }
}
