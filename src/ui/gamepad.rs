/// Gamepad poller using gilrs.
///
/// Produces one `PadFrame` per frame in the standard button layout:
///
/// ```text
///   0 A (South)   1 B (East)    2 X (West)   3 Y (North)
///   4 L1          5 R1          6 L2         7 R2
///   8 Select      9 Start      10 L3        11 R3
///  12-15 D-pad up/down/left/right          16 Mode
/// ```
///
/// Axis 0 is the left stick X, axis 1 the left stick Y with negative = up.
/// The D-pad is folded into the axes as ±1.0, so the sampler only has to
/// look at two numbers. Only the first pad that speaks is listened to.
///
/// Action mapping (confirm / cancel / pause) is loaded from config.toml.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};

use crate::config::GamepadConfig;
use crate::sim::sampler::{button, PadFrame};

const DPAD_UP: usize = 12;
const DPAD_DOWN: usize = 13;
const DPAD_LEFT: usize = 14;
const DPAD_RIGHT: usize = 15;

/// Logical button identifiers, numbered in the standard layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    L1 = 4,
    R1 = 5,
    L2 = 6,
    R2 = 7,
    Select = 8,
    Start = 9,
}

impl Btn {
    pub fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "L2" | "LT" | "LEFTTRIGGER2"  => Some(Btn::L2),
            "R2" | "RT" | "RIGHTTRIGGER2" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(feature = "gamepad")]
fn standard_index(btn: Button) -> Option<usize> {
    let idx = match btn {
        Button::South => Btn::A.index(),
        Button::East => Btn::B.index(),
        Button::West => Btn::X.index(),
        Button::North => Btn::Y.index(),
        Button::LeftTrigger => Btn::L1.index(),
        Button::RightTrigger => Btn::R1.index(),
        Button::LeftTrigger2 => Btn::L2.index(),
        Button::RightTrigger2 => Btn::R2.index(),
        Button::Select => Btn::Select.index(),
        Button::Start => Btn::Start.index(),
        Button::LeftThumb => 10,
        Button::RightThumb => 11,
        Button::DPadUp => DPAD_UP,
        Button::DPadDown => DPAD_DOWN,
        Button::DPadLeft => DPAD_LEFT,
        Button::DPadRight => DPAD_RIGHT,
        Button::Mode => 16,
        _ => return None,
    };
    Some(idx)
}

/// Action-to-button mapping, as standard indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PadBindings {
    pub confirm: Vec<usize>,
    pub cancel: Vec<usize>,
    pub pause: Vec<usize>,
}

impl Default for PadBindings {
    fn default() -> Self {
        PadBindings {
            confirm: vec![button::SOUTH],
            cancel: vec![button::EAST, button::START],
            pause: vec![button::SOUTH, button::EAST, button::START],
        }
    }
}

impl PadBindings {
    /// Resolve button names. A list with no recognised name keeps its default.
    pub fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(names: &[String]) -> Vec<usize> {
            names.iter().filter_map(|s| Btn::from_name(s)).map(Btn::index).collect()
        }
        let mut map = PadBindings::default();
        let cf = parse_list(&cfg.confirm);
        if !cf.is_empty() { map.confirm = cf; }
        let ca = parse_list(&cfg.cancel);
        if !ca.is_empty() { map.cancel = ca; }
        let pa = parse_list(&cfg.pause);
        if !pa.is_empty() { map.pause = pa; }
        map
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,
    #[cfg(feature = "gamepad")]
    active: Option<GamepadId>,

    buttons: [bool; crate::sim::sampler::PAD_BUTTONS],
    stick_x: f32,
    /// Raw stick Y, positive = up.
    stick_y: f32,
}

impl GamepadState {
    #[cfg(feature = "gamepad")]
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                let pads = g.gamepads().count();
                log::info!("gamepad backend ready, {pads} pad(s) attached");
                Some(g)
            }
            Err(e) => {
                log::warn!("gamepad support unavailable: {e}");
                None
            }
        };
        GamepadState { gilrs, ..GamepadState::detached() }
    }

    #[cfg(not(feature = "gamepad"))]
    pub fn new() -> Self {
        GamepadState::detached()
    }

    /// No backend; every frame is neutral.
    fn detached() -> Self {
        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: None,
            #[cfg(feature = "gamepad")]
            active: None,
            buttons: [false; crate::sim::sampler::PAD_BUTTONS],
            stick_x: 0.0,
            stick_y: 0.0,
        }
    }

    pub fn update(&mut self) {
        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            let active = *self.active.get_or_insert(event.id);
            if event.id != active {
                continue;
            }
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    if let Some(i) = standard_index(btn) { self.set_button(i, true); }
                }
                EventType::ButtonReleased(btn, _) => {
                    if let Some(i) = standard_index(btn) { self.set_button(i, false); }
                }
                EventType::AxisChanged(axis, value, _) => match axis {
                    Axis::LeftStickX => self.stick_x = value,
                    Axis::LeftStickY => self.stick_y = value,
                    _ => {}
                },
                EventType::Connected => log::info!("gamepad connected"),
                EventType::Disconnected => {
                    log::info!("gamepad disconnected");
                    self.active = None;
                    self.release_all();
                }
                _ => {}
            }
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn set_button(&mut self, idx: usize, held: bool) {
        if let Some(b) = self.buttons.get_mut(idx) {
            *b = held;
        }
    }

    /// Snapshot of the pad in the standard layout, D-pad folded into the axes.
    pub fn frame(&self) -> PadFrame {
        let b = &self.buttons;
        let axis_x = if b[DPAD_LEFT] {
            -1.0
        } else if b[DPAD_RIGHT] {
            1.0
        } else {
            self.stick_x
        };
        let axis_y = if b[DPAD_UP] {
            -1.0
        } else if b[DPAD_DOWN] {
            1.0
        } else {
            -self.stick_y
        };
        PadFrame { axis_x, axis_y, buttons: self.buttons }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        for b in &mut self.buttons { *b = false; }
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}
