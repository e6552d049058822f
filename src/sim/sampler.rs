/// Gamepad sampling task: turns polled pad state into one-shot signals.
///
/// The device layer polls the pad every frame (~60 Hz or faster) and hands
/// over a `PadFrame`. A `PadSampler` owns the edge state between frames:
///   - the last classified stick direction (axis latch)
///   - the last held state of every button
///
/// A held stick or button therefore fires exactly once per crossing.
/// The sampler has an explicit start/stop lifecycle; while stopped it
/// emits nothing. The first frame after `start()` only primes the latches
/// so a button still held from the previous screen is not replayed.

use crate::domain::direction::Direction;
use crate::domain::rules;

/// Buttons in the standard gamepad layout (0 = South … 16 = Home).
pub const PAD_BUTTONS: usize = 17;

/// Standard layout indices used by the game.
pub mod button {
    pub const SOUTH: usize = 0;
    pub const EAST: usize = 1;
    pub const START: usize = 9;
}

/// One polled snapshot of the first connected pad.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PadFrame {
    /// Axis 0: horizontal, negative = left.
    pub axis_x: f32,
    /// Axis 1: vertical, negative = up.
    pub axis_y: f32,
    pub buttons: [bool; PAD_BUTTONS],
}

/// Edge-triggered output of one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PadSignals {
    pub direction: Option<Direction>,
    pressed: [bool; PAD_BUTTONS],
}

impl PadSignals {
    pub fn pressed(&self, idx: usize) -> bool {
        self.pressed.get(idx).copied().unwrap_or(false)
    }

    pub fn any_pressed(&self, indices: &[usize]) -> bool {
        indices.iter().any(|&i| self.pressed(i))
    }
}

#[derive(Clone, Debug)]
pub struct PadSampler {
    active: bool,
    primed: bool,
    deadzone: f32,
    axis_latch: Option<Direction>,
    held: [bool; PAD_BUTTONS],
}

impl PadSampler {
    pub fn new(deadzone: f32) -> Self {
        PadSampler {
            active: false,
            primed: false,
            deadzone,
            axis_latch: None,
            held: [false; PAD_BUTTONS],
        }
    }

    pub fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.primed = false;
        }
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.primed = false;
        self.axis_latch = None;
        self.held = [false; PAD_BUTTONS];
    }

    /// Start or stop to match `want`. Repeated calls are no-ops.
    pub fn set_active(&mut self, want: bool) {
        if want { self.start() } else { self.stop() }
    }

    pub fn sample(&mut self, frame: &PadFrame) -> PadSignals {
        let mut out = PadSignals::default();
        if !self.active {
            return out;
        }

        let stick = rules::classify_stick(frame.axis_x, frame.axis_y, self.deadzone);
        if stick != self.axis_latch {
            self.axis_latch = stick;
            out.direction = stick;
        }

        for (i, &now) in frame.buttons.iter().enumerate() {
            out.pressed[i] = now && !self.held[i];
            self.held[i] = now;
        }

        if !self.primed {
            self.primed = true;
            return PadSignals::default();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stick(x: f32, y: f32) -> PadFrame {
        PadFrame { axis_x: x, axis_y: y, ..PadFrame::default() }
    }

    fn with_button(idx: usize) -> PadFrame {
        let mut f = PadFrame::default();
        f.buttons[idx] = true;
        f
    }

    fn started() -> PadSampler {
        let mut s = PadSampler::new(rules::STICK_DEADZONE);
        s.start();
        s.sample(&PadFrame::default());
        s
    }

    #[test]
    fn held_stick_fires_once() {
        let mut s = started();
        assert_eq!(s.sample(&stick(0.0, -0.9)).direction, Some(Direction::Up));
        for _ in 0..60 {
            assert_eq!(s.sample(&stick(0.0, -0.9)).direction, None);
        }
    }

    #[test]
    fn stick_refires_after_returning_to_center() {
        let mut s = started();
        s.sample(&stick(0.8, 0.0));
        s.sample(&stick(0.1, 0.0));
        assert_eq!(s.sample(&stick(0.8, 0.0)).direction, Some(Direction::Right));
    }

    #[test]
    fn rolling_stick_to_other_axis_fires_new_direction() {
        let mut s = started();
        s.sample(&stick(0.0, 0.9));
        assert_eq!(s.sample(&stick(-0.9, 0.2)).direction, Some(Direction::Left));
    }

    #[test]
    fn held_button_fires_once() {
        let mut s = started();
        assert!(s.sample(&with_button(button::SOUTH)).pressed(button::SOUTH));
        assert!(!s.sample(&with_button(button::SOUTH)).pressed(button::SOUTH));
        s.sample(&PadFrame::default());
        assert!(s.sample(&with_button(button::SOUTH)).pressed(button::SOUTH));
    }

    #[test]
    fn stopped_sampler_is_silent() {
        let mut s = PadSampler::new(rules::STICK_DEADZONE);
        let sig = s.sample(&with_button(button::START));
        assert!(!sig.pressed(button::START));
        assert_eq!(s.sample(&stick(0.0, 1.0)).direction, None);
    }

    #[test]
    fn first_sample_after_start_only_primes() {
        let mut s = PadSampler::new(rules::STICK_DEADZONE);
        s.start();
        // button held across the screen change
        assert!(!s.sample(&with_button(button::SOUTH)).pressed(button::SOUTH));
        assert!(!s.sample(&with_button(button::SOUTH)).pressed(button::SOUTH));
    }

    #[test]
    fn restart_reprimes() {
        let mut s = started();
        s.stop();
        s.start();
        assert_eq!(s.sample(&stick(1.0, 0.0)).direction, None);
        assert_eq!(s.sample(&stick(1.0, 0.0)).direction, None);
    }

    #[test]
    fn any_pressed_checks_each_index() {
        let mut s = started();
        let sig = s.sample(&with_button(button::START));
        assert!(sig.any_pressed(&[button::EAST, button::START]));
        assert!(!sig.any_pressed(&[button::SOUTH]));
        assert!(!sig.pressed(99));
    }
}
