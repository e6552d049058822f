/// Heading of the snake.
///
/// Serialized as a unit vector `{"x": dx, "y": dy}` so saved sessions keep
/// the vector shape; `(0,0)` is the initial lock.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "DirVec", into = "DirVec")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Initial lock: the snake holds its position while this is applied.
    Still,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector with y growing downward.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Still => (0, 0),
        }
    }

    pub fn from_vector(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, 0) => Some(Direction::Still),
            _ => None,
        }
    }

    /// Exact negation. `Still` is its own opposite.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Still => Direction::Still,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct DirVec {
    x: i32,
    y: i32,
}

impl TryFrom<DirVec> for Direction {
    type Error = String;

    fn try_from(v: DirVec) -> Result<Self, Self::Error> {
        Direction::from_vector(v.x, v.y)
            .ok_or_else(|| format!("({}, {}) is not a unit direction", v.x, v.y))
    }
}

impl From<Direction> for DirVec {
    fn from(d: Direction) -> Self {
        let (x, y) = d.vector();
        DirVec { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_negates_vector() {
        for d in Direction::CARDINALS {
            let (dx, dy) = d.vector();
            assert_eq!(d.opposite().vector(), (-dx, -dy));
        }
    }

    #[test]
    fn vector_round_trips() {
        for d in Direction::CARDINALS.iter().copied().chain([Direction::Still]) {
            let (dx, dy) = d.vector();
            assert_eq!(Direction::from_vector(dx, dy), Some(d));
        }
        assert_eq!(Direction::from_vector(1, 1), None);
    }

    #[test]
    fn serializes_as_vector_object() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, r#"{"x":-1,"y":0}"#);
    }

    #[test]
    fn rejects_diagonal_vector() {
        let parsed: Result<Direction, _> = serde_json::from_str(r#"{"x":1,"y":1}"#);
        assert!(parsed.is_err());
    }
}
