/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The board is drawn in "units" of two terminal columns by one row, which
/// is roughly square on common fonts. One grid cell covers `cell × cell`
/// units, where `cell` comes from the viewport and the grid density.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::grid::Coord;
use crate::sim::food::FoodKind;
use crate::sim::menu::{MenuItem, Navigator, SettingsItem};
use crate::sim::session::{Screen, Session};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for every "empty" terminal cell, so that
    /// row gaps on VTE terminals match the cell colour.
    const BASE_BG: Color = Color::Rgb { r: 18, g: 22, b: 18 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn invalidate(&mut self) {
        self.cells.fill(Cell::INVALID);
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }

    fn put_centered(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        let x = self.width.saturating_sub(s.chars().count()) / 2;
        self.put_str(x, y, s, fg, bg);
    }
}

// ── Layout ──

/// Terminal columns per board unit.
const UNIT_W: usize = 2;

const HUD_ROW: usize = 0;
const BOARD_ROW: usize = 1;
/// HUD row on top, message and help rows below the board.
const RESERVED_ROWS: usize = BOARD_ROW + 2;

const HUD_BG: Color = Color::Rgb { r: 20, g: 50, b: 20 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };
const BOARD_A: Color = Color::Rgb { r: 28, g: 36, b: 28 };
const BOARD_B: Color = Color::Rgb { r: 32, g: 42, b: 32 };
const HI: Color = Color::Rgb { r: 120, g: 255, b: 120 };
const TITLE: Color = Color::Rgb { r: 80, g: 220, b: 80 };
const DIM: Color = Color::DarkGrey;

/// Board units available for a terminal of `term_w × term_h` characters.
fn viewport_for(term_w: usize, term_h: usize) -> (u32, u32) {
    let w = term_w / UNIT_W;
    let h = term_h.saturating_sub(RESERVED_ROWS);
    (w.max(1) as u32, h.max(1) as u32)
}

fn food_paint(kind: FoodKind) -> (char, Color) {
    match kind {
        FoodKind::Apple => ('●', Color::Rgb { r: 230, g: 40, b: 40 }),
        FoodKind::Lemon => ('●', Color::Rgb { r: 250, g: 230, b: 60 }),
        FoodKind::Carrot => ('▲', Color::Rgb { r: 250, g: 140, b: 30 }),
        FoodKind::Pepper => ('♦', Color::Rgb { r: 200, g: 20, b: 60 }),
        FoodKind::Kiwi => ('●', Color::Rgb { r: 140, g: 200, b: 60 }),
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_screen: Option<Screen>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_screen: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Board units the current terminal offers.
    pub fn viewport(&self) -> (u32, u32) {
        viewport_for(self.term_w, self.term_h)
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        // Force full repaint: back ≠ front for every cell.
        self.back.invalidate();
    }

    /// Pick up a terminal resize. Returns true when the size changed.
    pub fn refresh_size(&mut self) -> io::Result<bool> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize == self.term_w && th as usize == self.term_h {
            return Ok(false);
        }
        self.resize(tw as usize, th as usize);
        queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        Ok(true)
    }

    pub fn render(&mut self, session: &Session) -> io::Result<()> {
        // Screen change → clear for a clean transition
        if self.last_screen != Some(session.screen()) {
            self.back.invalidate();
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_screen = Some(session.screen());
        }

        self.compose(session);
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn compose(&mut self, session: &Session) {
        self.front.clear();
        match session.screen() {
            Screen::Menu => self.compose_main_menu(session),
            Screen::Settings => self.compose_settings(session),
            Screen::Playing => self.compose_game(session),
            Screen::Paused => {
                self.compose_game(session);
                self.compose_pause_overlay(session);
            }
        }
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        // Explicit base colors; ResetColor would fall back to the terminal default
        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_hud(&mut self, s: &Session) {
        let hud = format!(
            " SNAKE   Score: {:<5}  High: {:<5}  Speed: {}ms  Length: {}",
            s.score(),
            s.high_score(),
            s.speed_ms(),
            s.snake().len(),
        );
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);
    }

    /// Top-left terminal column/row of a grid cell.
    fn cell_origin(&self, s: &Session, c: Coord) -> (usize, usize) {
        let unit = s.cell_size() as usize;
        (c.x as usize * unit * UNIT_W, BOARD_ROW + c.y as usize * unit)
    }

    fn paint_cell(&mut self, s: &Session, c: Coord, ch: char, fg: Color, bg: Color) {
        let unit = s.cell_size() as usize;
        let (x0, y0) = self.cell_origin(s, c);
        for dy in 0..unit {
            for dx in 0..unit * UNIT_W {
                // Glyph on the first column of each unit pair, padding after
                let glyph = if dx % UNIT_W == 0 { ch } else { ' ' };
                self.front.set(x0 + dx, y0 + dy, Cell::new(glyph, fg, bg));
            }
        }
    }

    fn compose_game(&mut self, s: &Session) {
        self.compose_hud(s);

        // ── Board ──
        for c in s.grid().cells() {
            let bg = if (c.x + c.y) % 2 == 0 { BOARD_A } else { BOARD_B };
            self.paint_cell(s, c, ' ', Color::White, bg);
        }

        let (glyph, color) = food_paint(s.food_kind());
        let food_bg = if (s.food().x + s.food().y) % 2 == 0 { BOARD_A } else { BOARD_B };
        self.paint_cell(s, s.food(), glyph, color, food_bg);

        let body = Color::Rgb { r: 40, g: 170, b: 60 };
        let tail = Color::Rgb { r: 30, g: 120, b: 45 };
        let head = Color::Rgb { r: 90, g: 230, b: 90 };
        let len = s.snake().len();
        for (i, c) in s.snake().iter().enumerate() {
            let (ch, bg) = if i == 0 {
                ('◆', head)
            } else if i + 1 == len {
                ('·', tail)
            } else {
                (' ', body)
            };
            self.paint_cell(s, c, ch, Color::Black, bg);
        }

        // ── Message and help bars ──
        let board_rows = s.grid().rows as usize * s.cell_size() as usize;
        let msg_row = BOARD_ROW + board_rows;
        if !s.message().is_empty() {
            self.front.fill_row(msg_row, MSG_BG);
            self.front.put_str(1, msg_row, s.message(), Color::Black, MSG_BG);
        }
        let help = " ←→↑↓/WASD steer   Esc/P pause   drag to swipe   Ctrl+C quit";
        self.front.put_str(0, msg_row + 1, help, DIM, Color::Reset);
    }

    fn compose_list<T: MenuItem>(&mut self, top: usize, nav: &Navigator<T>, detail: impl Fn(T) -> (String, bool)) {
        for (i, &item) in nav.items().iter().enumerate() {
            let (label, enabled) = detail(item);
            let selected = i == nav.cursor();
            let text = if selected { format!("▸ {label} ◂") } else { format!("  {label}  ") };
            let fg = if selected {
                HI
            } else if enabled {
                Color::White
            } else {
                DIM
            };
            self.front.put_centered(top + i * 2, &text, fg, Color::Reset);
        }
    }

    fn compose_banner(&mut self, top: usize) {
        let banner = [
            r"  ___  _  _    _    _  __ ___ ",
            r" / __|| \| |  /_\  | |/ /| __|",
            r" \__ \| .` | / _ \ | ' < | _| ",
            r" |___/|_|\_|/_/ \_\|_|\_\|___|",
        ];
        for (i, line) in banner.iter().enumerate() {
            self.front.put_centered(top + i, line, TITLE, Color::Reset);
        }
    }

    fn compose_main_menu(&mut self, s: &Session) {
        self.compose_banner(2);

        let has_save = s.has_save();
        self.compose_list(8, s.main_menu(), |item| {
            let enabled = !matches!(item, crate::sim::menu::MainItem::Continue) || has_save;
            (item.label().to_string(), enabled)
        });

        let items = s.main_menu().items().len();
        let info_row = 8 + items * 2 + 1;
        let high = format!("High score: {}", s.high_score());
        self.front.put_centered(info_row, &high, Color::Rgb { r: 255, g: 220, b: 50 }, Color::Reset);
        self.front.put_centered(
            info_row + 2,
            "↑↓ select   Enter/Space confirm   Ctrl+C quit",
            DIM,
            Color::Reset,
        );

        self.compose_message_bar(s);
    }

    fn compose_settings(&mut self, s: &Session) {
        self.front.put_centered(3, "SETTINGS", TITLE, Color::Reset);

        let speed = s.speed_ms();
        let density = s.density();
        self.compose_list(6, s.settings_menu(), |item| {
            let text = match item {
                SettingsItem::Speed => format!("{}   < {} ms >", item.label(), speed),
                SettingsItem::GridDensity => format!("{}   < {} >", item.label(), density),
                SettingsItem::Back => item.label().to_string(),
            };
            (text, true)
        });

        let grid = s.grid();
        let preview = format!("Board: {} × {} cells", grid.cols, grid.rows);
        self.front.put_centered(14, &preview, DIM, Color::Reset);
        self.front.put_centered(16, "Enter cycles a value   Esc back", DIM, Color::Reset);
    }

    fn compose_pause_overlay(&mut self, s: &Session) {
        let panel = Color::Rgb { r: 40, g: 40, b: 40 };
        let box_w = 32_usize.min(self.front.width);
        let box_h = 11_usize.min(self.front.height);
        let box_x = self.front.width.saturating_sub(box_w) / 2;
        let box_y = self.front.height.saturating_sub(box_h) / 2;

        for y in box_y..box_y + box_h {
            for x in box_x..box_x + box_w {
                self.front.set(x, y, Cell::new(' ', Color::White, panel));
            }
        }

        let hdr = Color::Rgb { r: 255, g: 220, b: 50 };
        let title = "❚❚  PAUSED";
        let tx = box_x + box_w.saturating_sub(title.chars().count()) / 2;
        self.front.put_str(tx, box_y + 1, title, hdr, panel);

        let nav = s.pause_menu();
        for (i, item) in nav.items().iter().enumerate() {
            let selected = i == nav.cursor();
            let text = if selected { format!("▸ {}", item.label()) } else { format!("  {}", item.label()) };
            let fg = if selected { HI } else { Color::White };
            self.front.put_str(box_x + 4, box_y + 3 + i * 2, &text, fg, panel);
        }

        if !s.message().is_empty() {
            let mx = box_x + box_w.saturating_sub(s.message().chars().count()) / 2;
            self.front.put_str(mx, box_y + box_h - 1, s.message(), hdr, panel);
        }
    }

    fn compose_message_bar(&mut self, s: &Session) {
        if s.message().is_empty() {
            return;
        }
        let row = self.front.height.saturating_sub(1);
        self.front.fill_row(row, MSG_BG);
        self.front.put_str(1, row, s.message(), Color::Black, MSG_BG);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::food::FoodSpawner;

    fn renderer(w: usize, h: usize) -> Renderer {
        let mut r = Renderer::new();
        r.resize(w, h);
        r
    }

    fn row_text(r: &Renderer, y: usize) -> String {
        (0..r.front.width).map(|x| r.front.get(x, y).ch).collect()
    }

    #[test]
    fn viewport_leaves_room_for_bars() {
        assert_eq!(viewport_for(80, 24), (40, 21));
        assert_eq!(viewport_for(1, 1), (1, 1));
    }

    #[test]
    fn hud_shows_score_and_high() {
        let mut r = renderer(80, 24);
        let mut s = Session::new(200, 45, r.viewport(), FoodSpawner::seeded(1));
        s.new_game();
        r.compose(&s);
        let hud = row_text(&r, HUD_ROW);
        assert!(hud.contains("Score: 0"));
        assert!(hud.contains("High: 0"));
    }

    #[test]
    fn snake_head_and_food_are_drawn() {
        let mut r = renderer(80, 24);
        let mut s = Session::new(200, 45, r.viewport(), FoodSpawner::seeded(1));
        s.new_game();
        r.compose(&s);

        let (hx, hy) = r.cell_origin(&s, s.snake().head());
        assert_eq!(r.front.get(hx, hy).ch, '◆');

        let (fx, fy) = r.cell_origin(&s, s.food());
        assert_eq!(r.front.get(fx, fy).ch, food_paint(s.food_kind()).0);
    }

    #[test]
    fn menu_marks_cursor() {
        let mut r = renderer(80, 24);
        let s = Session::new(200, 45, r.viewport(), FoodSpawner::seeded(1));
        r.compose(&s);
        assert!(row_text(&r, 8).contains("▸ New Game ◂"));
        assert!(row_text(&r, 10).contains("Continue"));
    }

    #[test]
    fn pause_overlay_lists_pause_menu() {
        let mut r = renderer(80, 24);
        let mut s = Session::new(200, 45, r.viewport(), FoodSpawner::seeded(1));
        s.new_game();
        s.pause();
        r.compose(&s);
        let all: String = (0..r.front.height).map(|y| row_text(&r, y)).collect();
        assert!(all.contains("PAUSED"));
        assert!(all.contains("▸ Resume"));
        assert!(all.contains("Return to Main Menu"));
    }
}
