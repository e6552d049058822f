/// Input rules: turning, swipe resolution, stick classification.
///
/// Pure functions. They decide "which direction does this signal mean"
/// and "is this turn legal" without touching any state.
///
/// ## Turn Truth Table
///
/// ┌──────────────────────────────┬────────┬──────────────────────┐
/// │ Candidate                     │ Allow? │ Notes                │
/// ├──────────────────────────────┼────────┼──────────────────────┤
/// │ Still                         │ DENY   │ never an input       │
/// │ applied.opposite()            │ DENY   │ instant self-bite    │
/// │ same as applied               │ ALLOW  │ no-op, harmless      │
/// │ perpendicular                 │ ALLOW  │                      │
/// │ anything while applied=Still  │ ALLOW  │ initial lock         │
/// └──────────────────────────────┴────────┴──────────────────────┘
///
/// ## Swipe Table (Δ = end - start, in device-independent px)
///
/// ┌──────────────────────────────┬──────────────────┐
/// │ Condition                     │ Result           │
/// ├──────────────────────────────┼──────────────────┤
/// │ |Δx| > |Δy| and |Δx| > min    │ Left / Right     │
/// │ |Δy| > |Δx| and |Δy| > min    │ Up / Down        │
/// │ |Δx| == |Δy|                  │ none (tie)       │
/// │ dominant axis ≤ min           │ none             │
/// └──────────────────────────────┴──────────────────┘
///
/// ## Stick Table (axis 1 negative = up), checked in priority order
///
/// ┌──────────────────────────────┬──────────┐
/// │ y < -deadzone                 │ Up       │
/// │ y >  deadzone                 │ Down     │
/// │ x < -deadzone                 │ Left     │
/// │ x >  deadzone                 │ Right    │
/// │ otherwise                     │ none     │
/// └──────────────────────────────┴──────────┘

use super::direction::Direction;

/// Default swipe threshold in device-independent pixels.
pub const MIN_SWIPE_PX: f32 = 30.0;

/// Default analog deadzone.
pub const STICK_DEADZONE: f32 = 0.5;

/// Can the snake, currently moving `applied`, be steered to `candidate`?
pub fn accepts_turn(applied: Direction, candidate: Direction) -> bool {
    candidate != Direction::Still && candidate != applied.opposite()
}

/// Resolve a press→release displacement into a direction.
pub fn resolve_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<Direction> {
    let ax = dx.abs();
    let ay = dy.abs();
    if ax > ay && ax > min_distance {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else if ay > ax && ay > min_distance {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    } else {
        None
    }
}

/// Classify a stick position. Vertical wins when both axes are past the deadzone.
pub fn classify_stick(x: f32, y: f32, deadzone: f32) -> Option<Direction> {
    if y < -deadzone {
        Some(Direction::Up)
    } else if y > deadzone {
        Some(Direction::Down)
    } else if x < -deadzone {
        Some(Direction::Left)
    } else if x > deadzone {
        Some(Direction::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Turning ──

    #[test]
    fn turn_accepted_iff_not_negation() {
        for c in Direction::CARDINALS {
            for d in Direction::CARDINALS {
                assert_eq!(accepts_turn(c, d), d != c.opposite(), "current {c:?} candidate {d:?}");
            }
        }
    }

    #[test]
    fn reversal_rejected() {
        assert!(!accepts_turn(Direction::Right, Direction::Left));
        assert!(!accepts_turn(Direction::Up, Direction::Down));
    }

    #[test]
    fn anything_goes_from_lock() {
        for d in Direction::CARDINALS {
            assert!(accepts_turn(Direction::Still, d));
        }
    }

    #[test]
    fn still_never_accepted() {
        assert!(!accepts_turn(Direction::Right, Direction::Still));
        assert!(!accepts_turn(Direction::Still, Direction::Still));
    }

    // ── Swipe ──

    #[test]
    fn horizontal_swipe() {
        assert_eq!(resolve_swipe(50.0, 10.0, MIN_SWIPE_PX), Some(Direction::Right));
        assert_eq!(resolve_swipe(-50.0, 10.0, MIN_SWIPE_PX), Some(Direction::Left));
    }

    #[test]
    fn vertical_swipe() {
        assert_eq!(resolve_swipe(5.0, 40.0, MIN_SWIPE_PX), Some(Direction::Down));
        assert_eq!(resolve_swipe(5.0, -40.0, MIN_SWIPE_PX), Some(Direction::Up));
    }

    #[test]
    fn tie_swipe_ignored() {
        assert_eq!(resolve_swipe(45.0, -45.0, MIN_SWIPE_PX), None);
    }

    #[test]
    fn short_swipe_ignored() {
        assert_eq!(resolve_swipe(30.0, 0.0, MIN_SWIPE_PX), None);
        assert_eq!(resolve_swipe(0.0, -12.0, MIN_SWIPE_PX), None);
    }

    // ── Stick ──

    #[test]
    fn stick_inside_deadzone_is_neutral() {
        assert_eq!(classify_stick(0.5, -0.5, STICK_DEADZONE), None);
        assert_eq!(classify_stick(0.2, 0.1, STICK_DEADZONE), None);
    }

    #[test]
    fn stick_vertical_has_priority() {
        assert_eq!(classify_stick(0.9, -0.8, STICK_DEADZONE), Some(Direction::Up));
        assert_eq!(classify_stick(-0.9, 0.8, STICK_DEADZONE), Some(Direction::Down));
    }

    #[test]
    fn stick_horizontal() {
        assert_eq!(classify_stick(-0.7, 0.0, STICK_DEADZONE), Some(Direction::Left));
        assert_eq!(classify_stick(0.7, 0.3, STICK_DEADZONE), Some(Direction::Right));
    }
}
