/// Terminal input tracker.
///
/// Collects, per frame:
///   - Key presses in arrival order (auto-repeat counts as a press)
///   - Mouse drags, turned into swipes on button release
///   - Terminal resizes
///
/// Key release events are ignored. A snake never needs "held" state:
/// direction changes latch in the reconciler until the next tick.

use std::time::Duration;

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::InputConfig;
use crate::domain::direction::Direction;
use crate::sim::reconciler::SwipeTracker;

pub struct InputState {
    /// Key codes pressed during the most recent drain, oldest first.
    presses: Vec<KeyCode>,

    /// Raw key events collected during drain, for modifier checks.
    raw_events: Vec<KeyEvent>,

    /// Swipes completed during the most recent drain.
    swipes: Vec<Direction>,

    /// Latest terminal size reported during the drain.
    resized: Option<(u16, u16)>,

    swipe: SwipeTracker,
    cell_width_px: f32,
    cell_height_px: f32,
}

impl InputState {
    pub fn new(cfg: &InputConfig) -> Self {
        InputState {
            presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
            swipes: Vec::with_capacity(2),
            resized: None,
            swipe: SwipeTracker::new(cfg.swipe_min_px),
            cell_width_px: cfg.cell_width_px,
            cell_height_px: cfg.cell_height_px,
        }
    }

    /// Drain all pending terminal events.
    /// Call this once per frame, before routing input.
    pub fn drain_events(&mut self) {
        self.begin_frame();

        // Read all available events without blocking
        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(ev) => self.handle(ev),
                Err(e) => {
                    log::warn!("terminal event read failed: {e}");
                    break;
                }
            }
        }
    }

    fn begin_frame(&mut self) {
        self.presses.clear();
        self.raw_events.clear();
        self.swipes.clear();
        self.resized = None;
    }

    fn handle(&mut self, ev: Event) {
        match ev {
            Event::Key(key) => {
                self.raw_events.push(key);
                if key.kind != KeyEventKind::Release {
                    self.presses.push(key.code);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.resized = Some((w, h)),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = mouse.column as f32 * self.cell_width_px;
        let y = mouse.row as f32 * self.cell_height_px;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.swipe.begin(x, y),
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(dir) = self.swipe.end(x, y) {
                    self.swipes.push(dir);
                }
            }
            _ => {}
        }
    }

    /// Every press this frame, in arrival order.
    pub fn presses(&self) -> &[KeyCode] {
        &self.presses
    }

    pub fn swipes(&self) -> &[Direction] {
        &self.swipes
    }

    pub fn resized(&self) -> Option<(u16, u16)> {
        self.resized
    }

    /// Check if any raw event this frame has Ctrl+C
    pub fn ctrl_c_pressed(&self) -> bool {
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}
