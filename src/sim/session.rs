/// Session: the single state container for a running program.
///
/// ## Screens
///
/// ```text
///   Menu ──New Game / Continue──▶ Playing ⇄ Paused
///    ▲  ◀──Return to Main Menu──────────────┘
///    ├──game over (collision / board filled)── Playing
///    └──▶ Settings ──Back──┘
/// ```
///
/// Fields are private. The frame loop and the renderer read through
/// accessors; every mutation goes through a transition method below, so
/// a screen change can never leave the snake, reconciler and score out
/// of step with each other.

use crate::domain::direction::Direction;
use crate::domain::grid::{Coord, GridSize};
use crate::domain::snake::Snake;
use super::event::GameEvent;
use super::food::{FoodKind, FoodSpawner};
use super::menu::{MainItem, MenuAction, MenuCommand, Navigator, PauseItem, SettingsItem};
use super::reconciler::InputReconciler;
use super::save::{SaveError, SaveSlot, SavedSession};
use super::step;

/// Where food sits when a new game starts (wrapped into small grids).
pub const INITIAL_FOOD: Coord = Coord::new(5, 5);

/// Heading of a freshly started snake.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Tick periods offered by the settings screen, slowest first.
pub const SPEED_PRESETS_MS: [u64; 4] = [300, 200, 120, 80];

/// Grid densities offered by the settings screen.
pub const DENSITY_PRESETS: [u32; 4] = [15, 25, 35, 45];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    Menu,
    Settings,
    Playing,
    Paused,
}

/// Persistence collaborator: one named slot.
pub trait SessionStore {
    fn save(&self, session: &SavedSession) -> Result<(), SaveError>;
    fn load(&self) -> Option<SavedSession>;
}

impl SessionStore for SaveSlot {
    fn save(&self, session: &SavedSession) -> Result<(), SaveError> {
        self.write(session)
    }

    fn load(&self) -> Option<SavedSession> {
        SaveSlot::load(self)
    }
}

pub struct Session {
    screen: Screen,

    // ── Geometry ──
    viewport: (u32, u32),
    density: u32,
    grid: GridSize,
    cell: u32,

    // ── Play state ──
    snake: Snake,
    food: Coord,
    food_kind: FoodKind,
    reconciler: InputReconciler,
    spawner: FoodSpawner,
    speed_ms: u64,

    // ── Scores ──
    score: u32,
    high_score: u32,

    // ── Menus ──
    main_menu: Navigator<MainItem>,
    pause_menu: Navigator<PauseItem>,
    settings_menu: Navigator<SettingsItem>,
    has_save: bool,
    message: String,
}

// ── Construction / accessors ──

impl Session {
    pub fn new(speed_ms: u64, density: u32, viewport: (u32, u32), spawner: FoodSpawner) -> Self {
        let (grid, cell) = GridSize::from_viewport(viewport.0, viewport.1, density);
        Session {
            screen: Screen::Menu,
            viewport,
            density,
            grid,
            cell,
            snake: Snake::seed(grid),
            food: grid.wrap(INITIAL_FOOD),
            food_kind: FoodKind::default(),
            reconciler: InputReconciler::new(INITIAL_DIRECTION),
            spawner,
            speed_ms: speed_ms.max(1),
            score: 0,
            high_score: 0,
            main_menu: Navigator::new(MainItem::ALL),
            pause_menu: Navigator::new(PauseItem::ALL),
            settings_menu: Navigator::new(SettingsItem::ALL),
            has_save: false,
            message: String::new(),
        }
    }

    pub fn screen(&self) -> Screen { self.screen }
    pub fn grid(&self) -> GridSize { self.grid }
    pub fn cell_size(&self) -> u32 { self.cell }
    pub fn density(&self) -> u32 { self.density }
    pub fn speed_ms(&self) -> u64 { self.speed_ms }
    pub fn snake(&self) -> &Snake { &self.snake }
    pub fn food(&self) -> Coord { self.food }
    pub fn food_kind(&self) -> FoodKind { self.food_kind }
    pub fn score(&self) -> u32 { self.score }
    pub fn high_score(&self) -> u32 { self.high_score }
    pub fn has_save(&self) -> bool { self.has_save }
    pub fn message(&self) -> &str { &self.message }
    pub fn main_menu(&self) -> &Navigator<MainItem> { &self.main_menu }
    pub fn pause_menu(&self) -> &Navigator<PauseItem> { &self.pause_menu }
    pub fn settings_menu(&self) -> &Navigator<SettingsItem> { &self.settings_menu }

    #[cfg(test)]
    pub fn direction(&self) -> Direction { self.reconciler.applied() }

    pub fn is_in_game(&self) -> bool {
        matches!(self.screen, Screen::Playing | Screen::Paused)
    }

    pub fn set_has_save(&mut self, has_save: bool) {
        self.has_save = has_save;
    }

    /// Record the renderer's viewport. The grid of a game in progress is
    /// fixed; the new size applies from the next new game or restore.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if !self.is_in_game() {
            self.relayout();
        }
    }

    fn relayout(&mut self) {
        let (grid, cell) = GridSize::from_viewport(self.viewport.0, self.viewport.1, self.density);
        self.grid = grid;
        self.cell = cell;
    }

    fn set_message(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }
}

// ── Game flow transitions ──

impl Session {
    /// Reset snake, direction, food and score; enter `Playing`.
    pub fn new_game(&mut self) -> Vec<GameEvent> {
        self.relayout();
        self.snake = Snake::seed(self.grid);
        self.reconciler.reset(INITIAL_DIRECTION);
        self.food = self.grid.wrap(INITIAL_FOOD);
        if self.snake.contains(self.food) {
            self.food = self.spawner.spawn(&self.snake, self.grid).unwrap_or(self.food);
        }
        self.food_kind = FoodKind::default();
        self.score = 0;
        self.message.clear();
        self.pause_menu.reset();
        self.screen = Screen::Playing;
        log::info!("new game on {}x{} grid", self.grid.cols, self.grid.rows);
        vec![GameEvent::GameStarted]
    }

    /// Offer a direction from any input source. Ignored unless playing.
    pub fn steer(&mut self, candidate: Direction) -> bool {
        if self.screen != Screen::Playing {
            return false;
        }
        self.reconciler.set_intended_direction(candidate)
    }

    pub fn pause(&mut self) -> Vec<GameEvent> {
        if self.screen != Screen::Playing {
            return vec![];
        }
        self.screen = Screen::Paused;
        self.pause_menu.reset();
        vec![GameEvent::Paused]
    }

    pub fn resume(&mut self) -> Vec<GameEvent> {
        if self.screen != Screen::Paused {
            return vec![];
        }
        self.screen = Screen::Playing;
        self.message.clear();
        vec![GameEvent::Resumed]
    }

    /// Flip `Playing ⇄ Paused`; no effect on other screens.
    pub fn toggle_pause(&mut self) -> Vec<GameEvent> {
        match self.screen {
            Screen::Playing => self.pause(),
            Screen::Paused => self.resume(),
            _ => vec![],
        }
    }

    /// Advance one tick. Only does anything while playing.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.screen != Screen::Playing {
            return vec![];
        }
        let direction = self.reconciler.commit();
        let out = step::step(&self.snake, direction, self.food, self.grid, &mut self.spawner);
        self.score += out.score_delta;

        let mut events = Vec::new();
        if out.score_delta > 0 {
            events.push(GameEvent::FoodEaten { at: out.snake.head() });
        }

        if out.terminated {
            self.snake = out.snake;
            events.extend(self.finish_game(out.board_filled));
            return events;
        }

        self.snake = out.snake;
        if let Some(food) = out.food {
            self.food = food;
            self.food_kind = self.spawner.pick_kind();
        }
        events
    }

    /// Close the current game: bank the high score, reset score, back to menu.
    fn finish_game(&mut self, board_filled: bool) -> Vec<GameEvent> {
        let final_score = self.score;
        let new_high = final_score > self.high_score;
        if new_high {
            self.high_score = final_score;
        }
        self.score = 0;
        self.snake = Snake::seed(self.grid);
        self.reconciler.reset(INITIAL_DIRECTION);
        self.screen = Screen::Menu;
        self.main_menu.reset();

        log::info!("game over: score {final_score}, high score {}", self.high_score);
        if board_filled {
            self.set_message(format!("BOARD CLEARED!  Score {final_score}"));
            vec![GameEvent::BoardFilled { score: final_score }]
        } else {
            let tag = if new_high { "  New high score!" } else { "" };
            self.set_message(format!("GAME OVER  Score {final_score}{tag}"));
            vec![GameEvent::GameOver { score: final_score, new_high }]
        }
    }

    /// Leave the game without finishing it.
    pub fn return_to_menu(&mut self) -> Vec<GameEvent> {
        self.screen = Screen::Menu;
        self.main_menu.reset();
        self.snake = Snake::seed(self.grid);
        self.reconciler.reset(INITIAL_DIRECTION);
        self.relayout();
        vec![]
    }

    pub fn open_settings(&mut self) -> Vec<GameEvent> {
        if self.screen != Screen::Menu {
            return vec![];
        }
        self.screen = Screen::Settings;
        self.settings_menu.reset();
        self.message.clear();
        vec![]
    }

    pub fn close_settings(&mut self) -> Vec<GameEvent> {
        if self.screen != Screen::Settings {
            return vec![];
        }
        self.screen = Screen::Menu;
        vec![]
    }

    pub fn cycle_speed(&mut self) -> Vec<GameEvent> {
        self.speed_ms = next_preset(&SPEED_PRESETS_MS, self.speed_ms);
        vec![GameEvent::SettingChanged]
    }

    pub fn cycle_density(&mut self) -> Vec<GameEvent> {
        self.density = next_preset(&DENSITY_PRESETS, self.density);
        self.relayout();
        vec![GameEvent::SettingChanged]
    }
}

fn next_preset<T: Copy + PartialEq>(presets: &[T], current: T) -> T {
    match presets.iter().position(|p| *p == current) {
        Some(i) => presets[(i + 1) % presets.len()],
        None => presets[0],
    }
}

// ── Snapshots ──

impl Session {
    /// The direction saved is the pending one, so a turn made just
    /// before pausing survives the round trip.
    pub fn snapshot(&self) -> SavedSession {
        SavedSession {
            speed: self.speed_ms,
            grid_size: self.density,
            score: self.score,
            high_score: self.high_score,
            snake: self.snake.to_vec(),
            direction: self.reconciler.pending(),
            food: self.food,
        }
    }

    /// Load a snapshot verbatim and enter `Playing`.
    ///
    /// Returns false (and changes nothing) when the snapshot cannot be
    /// played on the grid the current viewport gives its density, or when
    /// its body overlaps itself or has gaps.
    pub fn restore(&mut self, saved: &SavedSession) -> bool {
        if saved.speed == 0 || saved.grid_size == 0 {
            return false;
        }
        let Some(snake) = Snake::from_cells(saved.snake.clone()) else {
            return false;
        };
        let (grid, cell) = GridSize::from_viewport(self.viewport.0, self.viewport.1, saved.grid_size);
        if !snake.fits(grid) || !grid.contains(saved.food) {
            log::warn!(
                "saved session does not fit the {}x{} grid of this terminal",
                grid.cols, grid.rows
            );
            return false;
        }
        if !snake.is_consistent() || !snake.is_connected(grid) {
            log::warn!("saved snake of length {} is not one unbroken body", snake.len());
            return false;
        }

        self.speed_ms = saved.speed;
        self.density = saved.grid_size;
        self.grid = grid;
        self.cell = cell;
        self.score = saved.score;
        self.high_score = self.high_score.max(saved.high_score);
        self.snake = snake;
        self.reconciler.reset(saved.direction);
        self.food = saved.food;
        self.food_kind = FoodKind::default();
        self.message.clear();
        self.pause_menu.reset();
        self.screen = Screen::Playing;
        log::info!("restored session: score {}, length {}", self.score, self.snake.len());
        true
    }
}

// ── Menu commands ──

impl Session {
    /// Route a menu command to whichever list is on screen.
    pub fn menu_command(&mut self, cmd: MenuCommand, store: &dyn SessionStore) -> Vec<GameEvent> {
        match self.screen {
            Screen::Menu => match self.main_menu.apply(cmd) {
                MenuAction::Chosen(item) => self.choose_main(item, store),
                MenuAction::Moved => self.moved(),
                MenuAction::Back => vec![],
            },
            Screen::Paused => match self.pause_menu.apply(cmd) {
                MenuAction::Chosen(item) => self.choose_pause(item, store),
                MenuAction::Moved => self.moved(),
                MenuAction::Back => self.resume(),
            },
            Screen::Settings => match self.settings_menu.apply(cmd) {
                MenuAction::Chosen(SettingsItem::Speed) => self.cycle_speed(),
                MenuAction::Chosen(SettingsItem::GridDensity) => self.cycle_density(),
                MenuAction::Chosen(SettingsItem::Back) | MenuAction::Back => self.close_settings(),
                MenuAction::Moved => self.moved(),
            },
            Screen::Playing => vec![],
        }
    }

    fn moved(&mut self) -> Vec<GameEvent> {
        self.message.clear();
        vec![GameEvent::MenuMoved]
    }

    fn choose_main(&mut self, item: MainItem, store: &dyn SessionStore) -> Vec<GameEvent> {
        match item {
            MainItem::NewGame => self.new_game(),
            MainItem::Continue => match store.load() {
                Some(saved) if self.restore(&saved) => vec![GameEvent::Restored],
                _ => {
                    self.set_message("No saved game to continue");
                    vec![GameEvent::NothingToRestore]
                }
            },
            MainItem::Settings => self.open_settings(),
            MainItem::Exit => vec![GameEvent::ExitRequested],
        }
    }

    fn choose_pause(&mut self, item: PauseItem, store: &dyn SessionStore) -> Vec<GameEvent> {
        match item {
            PauseItem::Resume => self.resume(),
            PauseItem::Save => match store.save(&self.snapshot()) {
                Ok(()) => {
                    self.has_save = true;
                    self.set_message("Game saved");
                    vec![GameEvent::Saved]
                }
                Err(e) => {
                    log::warn!("save failed: {e}");
                    self.set_message("Save failed!");
                    vec![GameEvent::SaveFailed]
                }
            },
            PauseItem::MainMenu => self.return_to_menu(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::domain::snake::SEED_CELL;

    /// In-memory slot.
    #[derive(Default)]
    struct MemoryStore {
        slot: RefCell<Option<SavedSession>>,
        fail: bool,
    }

    impl SessionStore for MemoryStore {
        fn save(&self, session: &SavedSession) -> Result<(), SaveError> {
            if self.fail {
                let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
                return Err(SaveError::Io { path: "mem".into(), source });
            }
            *self.slot.borrow_mut() = Some(session.clone());
            Ok(())
        }
        fn load(&self) -> Option<SavedSession> {
            self.slot.borrow().clone()
        }
    }

    /// 20x20 grid: viewport 20x20 at density 20 gives unit cells.
    fn session() -> Session {
        Session::new(200, 20, (20, 20), FoodSpawner::seeded(5))
    }

    fn playing() -> Session {
        let mut s = session();
        s.new_game();
        s
    }

    fn saved(snake: &[(i32, i32)], dir: Direction, food: (i32, i32)) -> SavedSession {
        SavedSession {
            speed: 120,
            grid_size: 20,
            score: 3,
            high_score: 7,
            snake: snake.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            direction: dir,
            food: Coord::new(food.0, food.1),
        }
    }

    // ── New game ──

    #[test]
    fn starts_on_menu() {
        let s = session();
        assert_eq!(s.screen(), Screen::Menu);
        assert_eq!(s.grid(), GridSize::new(20, 20));
    }

    #[test]
    fn new_game_resets_state() {
        let mut s = session();
        assert_eq!(s.new_game(), vec![GameEvent::GameStarted]);
        assert_eq!(s.screen(), Screen::Playing);
        assert_eq!(s.snake().to_vec(), vec![SEED_CELL]);
        assert_eq!(s.direction(), Direction::Right);
        assert_eq!(s.food(), INITIAL_FOOD);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn new_game_moves_food_off_seed() {
        // 5x5 grid: seed (0,0) and initial food (0,0) coincide
        let mut s = Session::new(200, 5, (5, 5), FoodSpawner::seeded(1));
        s.new_game();
        assert!(!s.snake().contains(s.food()));
    }

    // ── Ticks ──

    #[test]
    fn tick_moves_snake() {
        let mut s = playing();
        s.tick();
        assert_eq!(s.snake().head(), Coord::new(11, 10));
        assert_eq!(s.snake().len(), 1);
    }

    #[test]
    fn input_applies_on_next_tick() {
        let mut s = playing();
        assert!(s.steer(Direction::Down));
        assert_eq!(s.direction(), Direction::Right);
        s.tick();
        assert_eq!(s.direction(), Direction::Down);
        assert_eq!(s.snake().head(), Coord::new(10, 11));
    }

    #[test]
    fn reversal_is_rejected_in_game() {
        let mut s = playing();
        assert!(!s.steer(Direction::Left));
        s.tick();
        assert_eq!(s.snake().head(), Coord::new(11, 10));
    }

    #[test]
    fn eating_scores_and_respawns() {
        let mut s = session();
        assert!(s.restore(&saved(&[(10, 10)], Direction::Right, (11, 10))));
        let ev = s.tick();
        assert_eq!(ev, vec![GameEvent::FoodEaten { at: Coord::new(11, 10) }]);
        assert_eq!(s.score(), 4);
        assert_eq!(s.snake().len(), 2);
        assert!(!s.snake().contains(s.food()));
    }

    #[test]
    fn collision_ends_game_and_banks_high_score() {
        let mut s = session();
        // high score 7 restored, score 3; then bite own tail via wraparound
        let mut snap = saved(&[(0, 5), (19, 5)], Direction::Left, (3, 3));
        snap.score = 12;
        assert!(s.restore(&snap));
        let ev = s.tick();
        assert_eq!(ev, vec![GameEvent::GameOver { score: 12, new_high: true }]);
        assert_eq!(s.screen(), Screen::Menu);
        assert_eq!(s.score(), 0);
        assert_eq!(s.high_score(), 12);
        assert_eq!(s.snake().to_vec(), vec![SEED_CELL]);
        assert!(s.message().starts_with("GAME OVER"));
    }

    #[test]
    fn high_score_never_drops() {
        let mut s = session();
        let mut snap = saved(&[(0, 5), (19, 5)], Direction::Left, (3, 3));
        snap.score = 2;
        snap.high_score = 7;
        s.restore(&snap);
        let ev = s.tick();
        assert_eq!(ev, vec![GameEvent::GameOver { score: 2, new_high: false }]);
        assert_eq!(s.high_score(), 7);
    }

    #[test]
    fn no_ticks_outside_play() {
        let mut s = playing();
        s.pause();
        let before = s.snake().clone();
        assert!(s.tick().is_empty());
        assert_eq!(s.snake(), &before);
    }

    // ── Pause ──

    #[test]
    fn pause_toggle_only_in_game() {
        let mut s = session();
        assert!(s.toggle_pause().is_empty());
        assert_eq!(s.screen(), Screen::Menu);
        s.new_game();
        assert_eq!(s.toggle_pause(), vec![GameEvent::Paused]);
        assert_eq!(s.toggle_pause(), vec![GameEvent::Resumed]);
        assert_eq!(s.screen(), Screen::Playing);
    }

    #[test]
    fn pause_twice_and_stray_resume_are_noops() {
        let mut s = playing();
        assert!(s.resume().is_empty());
        assert_eq!(s.screen(), Screen::Playing);
        s.pause();
        assert!(s.pause().is_empty());
        assert_eq!(s.screen(), Screen::Paused);
    }

    #[test]
    fn steering_ignored_while_paused() {
        let mut s = playing();
        s.pause();
        assert!(!s.steer(Direction::Up));
        s.resume();
        s.tick();
        assert_eq!(s.direction(), Direction::Right);
    }

    // ── Restore ──

    #[test]
    fn restore_is_verbatim() {
        let mut s = session();
        let snap = saved(&[(4, 4), (3, 4), (2, 4)], Direction::Up, (9, 9));
        assert!(s.restore(&snap));
        assert_eq!(s.screen(), Screen::Playing);
        assert_eq!(s.speed_ms(), 120);
        assert_eq!(s.score(), 3);
        assert_eq!(s.high_score(), 7);
        assert_eq!(s.direction(), Direction::Up);
        assert_eq!(s.food(), Coord::new(9, 9));
        assert_eq!(s.snapshot(), snap);
    }

    #[test]
    fn restore_rejects_empty_snake() {
        let mut s = session();
        assert!(!s.restore(&saved(&[], Direction::Up, (1, 1))));
        assert_eq!(s.screen(), Screen::Menu);
    }

    #[test]
    fn restore_rejects_out_of_grid_cells() {
        let mut s = session();
        assert!(!s.restore(&saved(&[(25, 4)], Direction::Up, (1, 1))));
        assert!(!s.restore(&saved(&[(2, 4)], Direction::Up, (1, -1))));
        assert_eq!(s.screen(), Screen::Menu);
    }

    #[test]
    fn restore_rejects_duplicate_cells() {
        let mut s = session();
        let snap = saved(&[(5, 5), (9, 9), (9, 9), (9, 9), (9, 9), (1, 1)], Direction::Right, (3, 3));
        assert!(!s.restore(&snap));
        assert_eq!(s.screen(), Screen::Menu);
        assert!(s.tick().is_empty());
    }

    #[test]
    fn restore_rejects_broken_body() {
        let mut s = session();
        assert!(!s.restore(&saved(&[(4, 4), (6, 4)], Direction::Right, (9, 9))));
        assert_eq!(s.screen(), Screen::Menu);
    }

    #[test]
    fn corrupt_save_falls_back_to_menu() {
        let store = MemoryStore::default();
        store.save(&saved(&[(2, 2), (2, 2), (2, 3)], Direction::Up, (9, 9))).unwrap();
        let mut s = session();
        s.menu_command(MenuCommand::Down, &store);
        assert_eq!(s.menu_command(MenuCommand::Confirm, &store), vec![GameEvent::NothingToRestore]);
        assert_eq!(s.screen(), Screen::Menu);
        assert_eq!(s.message(), "No saved game to continue");
    }

    #[test]
    fn snapshot_keeps_turn_made_before_pause() {
        let mut s = playing();
        s.tick();
        assert!(s.steer(Direction::Down));
        s.pause();
        let snap = s.snapshot();
        assert_eq!(snap.direction, Direction::Down);

        let mut other = session();
        assert!(other.restore(&snap));
        other.tick();
        assert_eq!(other.snake().head(), Coord::new(11, 11));
    }

    // ── Menus ──

    #[test]
    fn main_menu_new_game() {
        let store = MemoryStore::default();
        let mut s = session();
        let ev = s.menu_command(MenuCommand::Confirm, &store);
        assert_eq!(ev, vec![GameEvent::GameStarted]);
        assert_eq!(s.screen(), Screen::Playing);
    }

    #[test]
    fn continue_without_save_is_noop() {
        let store = MemoryStore::default();
        let mut s = session();
        s.menu_command(MenuCommand::Down, &store);
        let ev = s.menu_command(MenuCommand::Confirm, &store);
        assert_eq!(ev, vec![GameEvent::NothingToRestore]);
        assert_eq!(s.screen(), Screen::Menu);
    }

    #[test]
    fn save_from_pause_then_continue() {
        let store = MemoryStore::default();
        let mut s = playing();
        s.tick();
        s.pause();
        s.menu_command(MenuCommand::Down, &store);
        assert_eq!(s.menu_command(MenuCommand::Confirm, &store), vec![GameEvent::Saved]);
        assert!(s.has_save());
        let snap = s.snapshot();

        // Return to Main Menu
        s.menu_command(MenuCommand::Down, &store);
        s.menu_command(MenuCommand::Confirm, &store);
        assert_eq!(s.screen(), Screen::Menu);

        // Continue
        s.menu_command(MenuCommand::Down, &store);
        assert_eq!(s.menu_command(MenuCommand::Confirm, &store), vec![GameEvent::Restored]);
        assert_eq!(s.screen(), Screen::Playing);
        assert_eq!(s.snapshot(), snap);
    }

    #[test]
    fn failed_save_keeps_playing_state() {
        let store = MemoryStore { fail: true, ..MemoryStore::default() };
        let mut s = playing();
        s.pause();
        s.menu_command(MenuCommand::Down, &store);
        assert_eq!(s.menu_command(MenuCommand::Confirm, &store), vec![GameEvent::SaveFailed]);
        assert_eq!(s.screen(), Screen::Paused);
        assert_eq!(s.message(), "Save failed!");
    }

    #[test]
    fn back_in_pause_menu_resumes() {
        let store = MemoryStore::default();
        let mut s = playing();
        s.pause();
        assert_eq!(s.menu_command(MenuCommand::Back, &store), vec![GameEvent::Resumed]);
    }

    #[test]
    fn settings_cycle_speed_and_density() {
        let store = MemoryStore::default();
        let mut s = session();
        s.menu_command(MenuCommand::Up, &store); // Exit
        s.menu_command(MenuCommand::Up, &store); // Settings
        s.menu_command(MenuCommand::Confirm, &store);
        assert_eq!(s.screen(), Screen::Settings);

        s.menu_command(MenuCommand::Confirm, &store);
        assert_eq!(s.speed_ms(), 120);

        s.menu_command(MenuCommand::Down, &store);
        s.menu_command(MenuCommand::Confirm, &store);
        assert_eq!(s.density(), 15);
        assert_eq!(s.grid(), GridSize::new(20, 20));

        s.menu_command(MenuCommand::Back, &store);
        assert_eq!(s.screen(), Screen::Menu);
    }

    #[test]
    fn exit_is_reported() {
        let store = MemoryStore::default();
        let mut s = session();
        s.menu_command(MenuCommand::Up, &store);
        assert_eq!(s.menu_command(MenuCommand::Confirm, &store), vec![GameEvent::ExitRequested]);
    }

    #[test]
    fn viewport_change_waits_for_next_game() {
        let mut s = playing();
        s.set_viewport(40, 30);
        assert_eq!(s.grid(), GridSize::new(20, 20));
        s.return_to_menu();
        assert_eq!(s.grid(), GridSize::new(40, 30));
    }
}
