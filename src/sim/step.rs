/// The step function: advances the snake by one tick.
///
/// Processing order:
///   1. New head = head + direction, wrapped on the torus
///   2. Self-collision against the full pre-move body (tail included)
///   3. Food collision → grow, score +1, respawn food
///   4. Otherwise → move (push head, drop tail)
///
/// The tail is part of the collision set even though a plain move would
/// vacate it this same tick. Chasing your own tail one cell behind is a
/// collision.

use rand::Rng;

use crate::domain::direction::Direction;
use crate::domain::grid::{Coord, GridSize};
use crate::domain::snake::Snake;
use super::food::FoodSpawner;

/// Result of the pure movement rule, before any food bookkeeping.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Advance {
    /// Direction is the `(0,0)` lock; nothing moves.
    Idle,
    Moved(Snake),
    Grew(Snake),
    Collided,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StepOutcome {
    /// Snake for the next tick. After termination this is the seed snake.
    pub snake: Snake,
    /// Replacement food when the old one was eaten.
    pub food: Option<Coord>,
    pub score_delta: u32,
    pub terminated: bool,
    /// Terminated because the grown snake left no free cell.
    pub board_filled: bool,
}

/// Pure movement rule.
pub fn advance(snake: &Snake, direction: Direction, food: Coord, grid: GridSize) -> Advance {
    if direction == Direction::Still {
        return Advance::Idle;
    }

    let new_head = grid.offset(snake.head(), direction);

    if snake.contains(new_head) {
        return Advance::Collided;
    }

    if new_head == food {
        Advance::Grew(snake.grown_to(new_head))
    } else {
        Advance::Moved(snake.moved_to(new_head))
    }
}

/// One full tick: movement plus food respawn.
pub fn step<R: Rng>(
    snake: &Snake,
    direction: Direction,
    food: Coord,
    grid: GridSize,
    spawner: &mut FoodSpawner<R>,
) -> StepOutcome {
    let quiet = |snake: Snake| StepOutcome {
        snake,
        food: None,
        score_delta: 0,
        terminated: false,
        board_filled: false,
    };

    match advance(snake, direction, food, grid) {
        Advance::Idle => quiet(snake.clone()),
        Advance::Moved(next) => {
            debug_assert!(next.is_consistent());
            quiet(next)
        }
        Advance::Collided => StepOutcome {
            snake: Snake::seed(grid),
            food: None,
            score_delta: 0,
            terminated: true,
            board_filled: false,
        },
        Advance::Grew(next) => {
            debug_assert!(next.is_consistent());
            match spawner.spawn(&next, grid) {
                Some(cell) => StepOutcome {
                    snake: next,
                    food: Some(cell),
                    score_delta: 1,
                    terminated: false,
                    board_filled: false,
                },
                None => StepOutcome {
                    snake: Snake::seed(grid),
                    food: None,
                    score_delta: 1,
                    terminated: true,
                    board_filled: true,
                },
            }
        }
    }
}
