/// Per-frame input routing: keys, swipes and pad signals to session calls.
///
/// Two pad samplers, one for gameplay and one for menus. Only the one that
/// matches the screen at the start of the frame runs. Switching restarts
/// it, and a restarted sampler only primes on its first frame, so a button
/// held across a screen change is never handled twice.
///
/// In play, a pause key or the pad pause binding toggles pause and nothing
/// else happens that frame; otherwise every direction source steers. In
/// menus, inputs after a screen change are dropped so one frame never acts
/// on two different lists.

use crossterm::event::KeyCode;

use super::gamepad::PadBindings;
use crate::domain::direction::Direction;
use crate::sim::event::GameEvent;
use crate::sim::menu::MenuCommand;
use crate::sim::sampler::{PadFrame, PadSampler, PadSignals};
use crate::sim::session::{Screen, Session, SessionStore};

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_PAUSE: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('p'), KeyCode::Char('P')];

/// Terminal input collected during one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameKeys<'a> {
    pub presses: &'a [KeyCode],
    pub swipes: &'a [Direction],
}

impl FrameKeys<'_> {
    fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        self.presses.iter().any(|c| codes.contains(c))
    }
}

/// What a key means on a menu screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum MenuInput {
    Command(MenuCommand),
    TogglePause,
}

pub struct Router {
    play_pad: PadSampler,
    menu_pad: PadSampler,
    bindings: PadBindings,
}

impl Router {
    pub fn new(stick_deadzone: f32, bindings: PadBindings) -> Self {
        Router {
            play_pad: PadSampler::new(stick_deadzone),
            menu_pad: PadSampler::new(stick_deadzone),
            bindings,
        }
    }

    pub fn route(
        &mut self,
        session: &mut Session,
        keys: FrameKeys<'_>,
        pad: &PadFrame,
        store: &dyn SessionStore,
    ) -> Vec<GameEvent> {
        let playing = session.screen() == Screen::Playing;
        self.play_pad.set_active(playing);
        self.menu_pad.set_active(!playing);
        let play_signals = self.play_pad.sample(pad);
        let menu_signals = self.menu_pad.sample(pad);

        if playing {
            self.route_play(session, keys, &play_signals)
        } else {
            self.route_menu(session, keys, &menu_signals, store)
        }
    }

    fn route_play(&self, session: &mut Session, keys: FrameKeys<'_>, pad: &PadSignals) -> Vec<GameEvent> {
        if keys.any_pressed(KEYS_PAUSE) || pad.any_pressed(&self.bindings.pause) {
            return session.toggle_pause();
        }

        let typed = keys.presses.iter().filter_map(|&c| key_direction(c));
        let swiped = keys.swipes.iter().copied();
        for dir in typed.chain(swiped).chain(pad.direction) {
            session.steer(dir);
        }
        vec![]
    }

    fn route_menu(
        &self,
        session: &mut Session,
        keys: FrameKeys<'_>,
        pad: &PadSignals,
        store: &dyn SessionStore,
    ) -> Vec<GameEvent> {
        let screen = session.screen();

        let mut inputs: Vec<MenuInput> =
            keys.presses.iter().filter_map(|&c| key_menu_input(c, screen)).collect();
        let moves = keys.swipes.iter().copied().chain(pad.direction);
        inputs.extend(moves.filter_map(MenuCommand::from_direction).map(MenuInput::Command));
        // Confirm wins when both are hit in the same frame
        if pad.any_pressed(&self.bindings.confirm) {
            inputs.push(MenuInput::Command(MenuCommand::Confirm));
        } else if pad.any_pressed(&self.bindings.cancel) {
            inputs.push(MenuInput::Command(MenuCommand::Back));
        }

        let mut events = Vec::new();
        for input in inputs {
            if session.screen() != screen {
                break;
            }
            events.extend(match input {
                MenuInput::Command(cmd) => session.menu_command(cmd, store),
                MenuInput::TogglePause => session.toggle_pause(),
            });
        }
        events
    }
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    if KEYS_UP.contains(&code) {
        Some(Direction::Up)
    } else if KEYS_DOWN.contains(&code) {
        Some(Direction::Down)
    } else if KEYS_LEFT.contains(&code) {
        Some(Direction::Left)
    } else if KEYS_RIGHT.contains(&code) {
        Some(Direction::Right)
    } else {
        None
    }
}

fn key_menu_input(code: KeyCode, screen: Screen) -> Option<MenuInput> {
    if KEYS_CONFIRM.contains(&code) {
        return Some(MenuInput::Command(MenuCommand::Confirm));
    }
    if screen == Screen::Paused && KEYS_PAUSE.contains(&code) {
        return Some(MenuInput::TogglePause);
    }
    if code == KeyCode::Esc {
        return Some(MenuInput::Command(MenuCommand::Back));
    }
    key_direction(code).and_then(MenuCommand::from_direction).map(MenuInput::Command)
}
