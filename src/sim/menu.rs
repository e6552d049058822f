/// Selectable-list navigator shared by every menu.
///
/// Each menu is a static list of choices plus a cursor. Input sources
/// (keyboard, gamepad sampler) translate their signals into `MenuCommand`s;
/// the navigator moves the cursor with wrap-around and reports what was
/// confirmed. What a confirmed choice *does* is the caller's business.

use crate::domain::direction::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuCommand {
    Up,
    Down,
    Confirm,
    Back,
}

impl MenuCommand {
    /// Vertical directions navigate; horizontal ones do nothing in a list.
    pub fn from_direction(d: Direction) -> Option<MenuCommand> {
        match d {
            Direction::Up => Some(MenuCommand::Up),
            Direction::Down => Some(MenuCommand::Down),
            _ => None,
        }
    }
}

/// What the navigator made of a command.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuAction<T> {
    Moved,
    Chosen(T),
    Back,
}

/// A choice that can be listed.
pub trait MenuItem: Copy + 'static {
    fn label(&self) -> &'static str;
}

#[derive(Clone, Debug)]
pub struct Navigator<T: 'static> {
    items: &'static [T],
    cursor: usize,
}

impl<T: MenuItem> Navigator<T> {
    pub fn new(items: &'static [T]) -> Self {
        debug_assert!(!items.is_empty(), "menu needs at least one item");
        Navigator { items, cursor: 0 }
    }

    pub fn items(&self) -> &'static [T] {
        self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> T {
        self.items[self.cursor]
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn apply(&mut self, cmd: MenuCommand) -> MenuAction<T> {
        let n = self.items.len();
        match cmd {
            MenuCommand::Up => {
                self.cursor = (self.cursor + n - 1) % n;
                MenuAction::Moved
            }
            MenuCommand::Down => {
                self.cursor = (self.cursor + 1) % n;
                MenuAction::Moved
            }
            MenuCommand::Confirm => MenuAction::Chosen(self.selected()),
            MenuCommand::Back => MenuAction::Back,
        }
    }
}

// ── The game's menus ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MainItem {
    NewGame,
    Continue,
    Settings,
    Exit,
}

impl MainItem {
    pub const ALL: &'static [MainItem] =
        &[MainItem::NewGame, MainItem::Continue, MainItem::Settings, MainItem::Exit];
}

impl MenuItem for MainItem {
    fn label(&self) -> &'static str {
        match self {
            MainItem::NewGame => "New Game",
            MainItem::Continue => "Continue",
            MainItem::Settings => "Settings",
            MainItem::Exit => "Exit",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PauseItem {
    Resume,
    Save,
    MainMenu,
}

impl PauseItem {
    pub const ALL: &'static [PauseItem] = &[PauseItem::Resume, PauseItem::Save, PauseItem::MainMenu];
}

impl MenuItem for PauseItem {
    fn label(&self) -> &'static str {
        match self {
            PauseItem::Resume => "Resume",
            PauseItem::Save => "Save",
            PauseItem::MainMenu => "Return to Main Menu",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SettingsItem {
    Speed,
    GridDensity,
    Back,
}

impl SettingsItem {
    pub const ALL: &'static [SettingsItem] =
        &[SettingsItem::Speed, SettingsItem::GridDensity, SettingsItem::Back];
}

impl MenuItem for SettingsItem {
    fn label(&self) -> &'static str {
        match self {
            SettingsItem::Speed => "Speed",
            SettingsItem::GridDensity => "Grid Size",
            SettingsItem::Back => "Back",
        }
    }
}
