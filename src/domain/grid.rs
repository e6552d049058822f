/// Grid model: cell coordinates and toroidal arithmetic.
///
/// The playfield has no walls. Leaving one edge re-enters at the opposite
/// edge, so every coordinate operation goes through `GridSize::wrap`.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// One grid cell. Plain value, no identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Playfield dimensions in cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridSize {
    pub cols: i32,
    pub rows: i32,
}

impl GridSize {
    pub fn new(cols: i32, rows: i32) -> Self {
        debug_assert!(cols > 0 && rows > 0, "grid must have at least one cell");
        GridSize { cols, rows }
    }

    /// Derive the grid from a viewport measured in renderer units.
    ///
    /// `density` is how many cells fit along the shorter viewport side.
    /// The cell edge never drops below one unit, so small viewports get
    /// one cell per unit instead of more cells than can be drawn.
    /// Returns the grid and the cell edge length.
    pub fn from_viewport(width: u32, height: u32, density: u32) -> (GridSize, u32) {
        let width = width.max(1);
        let height = height.max(1);
        let cell = (width.min(height) / density.max(1)).max(1);
        let grid = GridSize::new((width / cell) as i32, (height / cell) as i32);
        (grid, cell)
    }

    pub fn cell_count(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.cols && c.y >= 0 && c.y < self.rows
    }

    /// Fold any coordinate back onto the torus.
    #[inline]
    pub fn wrap(&self, c: Coord) -> Coord {
        Coord {
            x: c.x.rem_euclid(self.cols),
            y: c.y.rem_euclid(self.rows),
        }
    }

    /// The cell one step from `from` in `dir`, wrapping at the edges.
    #[inline]
    pub fn offset(&self, from: Coord, dir: Direction) -> Coord {
        let (dx, dy) = dir.vector();
        self.wrap(Coord::new(from.x + dx, from.y + dy))
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Coord::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_one_cell() {
        let g = GridSize::new(20, 20);
        assert_eq!(g.offset(Coord::new(10, 10), Direction::Right), Coord::new(11, 10));
        assert_eq!(g.offset(Coord::new(10, 10), Direction::Up), Coord::new(10, 9));
    }

    #[test]
    fn offset_wraps_left_edge() {
        let g = GridSize::new(20, 20);
        assert_eq!(g.offset(Coord::new(0, 5), Direction::Left), Coord::new(19, 5));
    }

    #[test]
    fn offset_wraps_bottom_edge() {
        let g = GridSize::new(20, 15);
        assert_eq!(g.offset(Coord::new(3, 14), Direction::Down), Coord::new(3, 0));
    }

    #[test]
    fn still_offset_stays_put() {
        let g = GridSize::new(4, 4);
        assert_eq!(g.offset(Coord::new(2, 2), Direction::Still), Coord::new(2, 2));
    }

    #[test]
    fn wrap_handles_far_negative() {
        let g = GridSize::new(5, 5);
        assert_eq!(g.wrap(Coord::new(-11, 12)), Coord::new(4, 2));
    }

    #[test]
    fn viewport_with_high_density_uses_unit_cells() {
        let (g, cell) = GridSize::from_viewport(40, 23, 45);
        assert_eq!(cell, 1);
        assert_eq!(g, GridSize::new(40, 23));
    }

    #[test]
    fn viewport_with_low_density_uses_larger_cells() {
        let (g, cell) = GridSize::from_viewport(40, 23, 10);
        assert_eq!(cell, 2);
        assert_eq!(g, GridSize::new(20, 11));
    }

    #[test]
    fn cells_covers_whole_grid() {
        let g = GridSize::new(3, 2);
        let all: Vec<Coord> = g.cells().collect();
        assert_eq!(all.len(), g.cell_count());
        assert_eq!(all[0], Coord::new(0, 0));
        assert_eq!(all[5], Coord::new(2, 1));
    }
}
