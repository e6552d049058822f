/// Snake body: head-first cell list.
///
/// `cells[0]` is the head, the back is the tail. Insertion order is the
/// body order, so a move is "push head, pop tail" and growth is "push head".

use std::collections::{HashSet, VecDeque};

use super::direction::Direction;
use super::grid::{Coord, GridSize};

/// Where every new game starts (before wrapping into small grids).
pub const SEED_CELL: Coord = Coord::new(10, 10);

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snake {
    cells: VecDeque<Coord>,
}

impl Snake {
    /// Single-segment snake on the seed cell, wrapped into `grid`.
    pub fn seed(grid: GridSize) -> Self {
        Snake { cells: VecDeque::from([grid.wrap(SEED_CELL)]) }
    }

    /// Build from head-first cells. `None` for an empty list.
    pub fn from_cells(cells: Vec<Coord>) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Snake { cells: cells.into() })
    }

    pub fn head(&self) -> Coord {
        self.cells[0]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Coord> {
        self.cells.iter().copied().collect()
    }

    /// True when every cell lies inside `grid`.
    pub fn fits(&self, grid: GridSize) -> bool {
        self.cells.iter().all(|c| grid.contains(*c))
    }

    /// New snake with `head` prepended and the tail dropped.
    pub fn moved_to(&self, head: Coord) -> Snake {
        let mut cells = self.cells.clone();
        cells.push_front(head);
        cells.pop_back();
        Snake { cells }
    }

    /// New snake with `head` prepended and the whole body kept.
    pub fn grown_to(&self, head: Coord) -> Snake {
        let mut cells = self.cells.clone();
        cells.push_front(head);
        Snake { cells }
    }

    /// No repeated cell among the first N-1 segments.
    pub fn is_consistent(&self) -> bool {
        let n = self.cells.len().saturating_sub(1);
        let mut seen = HashSet::with_capacity(n);
        self.cells.iter().take(n).all(|c| seen.insert(*c))
    }

    /// Every segment is one wrapped step away from the one before it.
    pub fn is_connected(&self, grid: GridSize) -> bool {
        self.cells.iter().zip(self.cells.iter().skip(1)).all(|(&a, &b)| {
            Direction::CARDINALS.iter().any(|&d| grid.offset(a, d) == b)
        })
    }
}
