/// Input reconciler: one pending direction fed by every input source.
///
/// Two values are tracked:
///   - `applied`: the direction the last tick actually moved in
///   - `pending`: what the next tick will use
///
/// Candidates are checked against `applied`, not `pending`. Two quick
/// presses inside one tick (Up then Left while moving Right) can therefore
/// never chain into a reversal: Left is still the negation of Right.

use crate::domain::direction::Direction;
use crate::domain::rules;

#[derive(Clone, Debug)]
pub struct InputReconciler {
    applied: Direction,
    pending: Direction,
}

impl InputReconciler {
    pub fn new(initial: Direction) -> Self {
        InputReconciler { applied: initial, pending: initial }
    }

    /// Offer a direction. Returns whether it became the pending direction.
    pub fn set_intended_direction(&mut self, candidate: Direction) -> bool {
        if !rules::accepts_turn(self.applied, candidate) {
            log::debug!("rejected turn {:?} while moving {:?}", candidate, self.applied);
            return false;
        }
        self.pending = candidate;
        true
    }

    /// Called at tick start: latch the pending direction for this tick.
    pub fn commit(&mut self) -> Direction {
        self.applied = self.pending;
        self.applied
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn applied(&self) -> Direction {
        self.applied
    }

    /// Overwrite both values (new game, restore).
    pub fn reset(&mut self, direction: Direction) {
        self.applied = direction;
        self.pending = direction;
    }
}

/// Press/release tracker turning one drag gesture into at most one direction.
#[derive(Clone, Debug)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
    min_distance: f32,
}

impl SwipeTracker {
    pub fn new(min_distance: f32) -> Self {
        SwipeTracker { start: None, min_distance }
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture. A release without a press resolves to nothing.
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        rules::resolve_swipe(x - sx, y - sy, self.min_distance)
    }
}
