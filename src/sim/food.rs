/// Food spawner: picks a free cell for the next piece of food.
///
/// Rejection sampling first (draw a random cell, retry if the snake is on
/// it). Long snakes make rejections frequent, so after a bounded number of
/// misses the spawner samples the complement set directly. That keeps the
/// result uniform over free cells and guarantees termination.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::grid::{Coord, GridSize};
use crate::domain::snake::Snake;

/// Misses tolerated before switching to complement sampling.
const MAX_REJECTIONS: usize = 64;

/// Cosmetic variety; the renderer picks a glyph per kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FoodKind {
    #[default]
    Apple,
    Lemon,
    Carrot,
    Pepper,
    Kiwi,
}

impl FoodKind {
    pub const ALL: [FoodKind; 5] =
        [FoodKind::Apple, FoodKind::Lemon, FoodKind::Carrot, FoodKind::Pepper, FoodKind::Kiwi];
}

pub struct FoodSpawner<R = StdRng> {
    rng: R,
}

impl FoodSpawner<StdRng> {
    pub fn from_entropy() -> Self {
        FoodSpawner { rng: StdRng::from_entropy() }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        FoodSpawner { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> FoodSpawner<R> {
    /// A cell not covered by `snake`, or `None` when the snake fills the grid.
    pub fn spawn(&mut self, snake: &Snake, grid: GridSize) -> Option<Coord> {
        if snake.len() >= grid.cell_count() {
            return None;
        }

        for _ in 0..MAX_REJECTIONS {
            let c = Coord::new(self.rng.gen_range(0..grid.cols), self.rng.gen_range(0..grid.rows));
            if !snake.contains(c) {
                return Some(c);
            }
        }

        log::debug!("food rejection sampling exhausted, sampling free cells (snake len {})", snake.len());
        let free: Vec<Coord> = grid.cells().filter(|c| !snake.contains(*c)).collect();
        free.choose(&mut self.rng).copied()
    }

    pub fn pick_kind(&mut self) -> FoodKind {
        FoodKind::ALL.choose(&mut self.rng).copied().unwrap_or_default()
    }
}
