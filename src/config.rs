/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory, the CWD or the
/// XDG data directory. Falls back to defaults if the file is missing or
/// incomplete.
///
/// ```toml
/// [speed]
/// tick_rate_ms = 200
///
/// [grid]
/// density = 45
///
/// [input]
/// swipe_min_px = 30.0
/// cell_width_px = 8.0
/// cell_height_px = 16.0
/// stick_deadzone = 0.5
///
/// [gamepad]
/// confirm = ["A"]
/// cancel = ["B", "Start"]
/// pause = ["A", "B", "Start"]
///
/// [general]
/// save_file = "snake_save.json"
/// log_file = "snake.log"
/// ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::rules::{MIN_SWIPE_PX, STICK_DEADZONE};
use crate::sim::clock::DEFAULT_PERIOD;
use crate::sim::save::DEFAULT_SAVE_FILE;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub grid: GridConfig,
    pub input: InputConfig,
    pub gamepad: GamepadConfig,
    pub save_file: String,
    pub log_file: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Cells along the shorter viewport side.
    pub density: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputConfig {
    pub swipe_min_px: f32,
    /// Pixel size of one terminal cell, for turning mouse drags into swipes.
    pub cell_width_px: f32,
    pub cell_height_px: f32,
    pub stick_deadzone: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub pause: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    input: TomlInput,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGrid {
    #[serde(default = "default_density")]
    density: u32,
}

#[derive(Deserialize, Debug)]
struct TomlInput {
    #[serde(default = "default_swipe_min")]
    swipe_min_px: f32,
    #[serde(default = "default_cell_width")]
    cell_width_px: f32,
    #[serde(default = "default_cell_height")]
    cell_height_px: f32,
    #[serde(default = "default_deadzone")]
    stick_deadzone: f32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_pause")]
    pause: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_save_file")]
    save_file: String,
    #[serde(default = "default_log_file")]
    log_file: String,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { DEFAULT_PERIOD.as_millis() as u64 }
fn default_density() -> u32 { 45 }
fn default_swipe_min() -> f32 { MIN_SWIPE_PX }
fn default_cell_width() -> f32 { 8.0 }
fn default_cell_height() -> f32 { 16.0 }
fn default_deadzone() -> f32 { STICK_DEADZONE }

fn default_confirm() -> Vec<String> { vec!["A".into()] }
fn default_cancel() -> Vec<String> { vec!["B".into(), "Start".into()] }
fn default_pause() -> Vec<String> { vec!["A".into(), "B".into(), "Start".into()] }
fn default_save_file() -> String { DEFAULT_SAVE_FILE.into() }
fn default_log_file() -> String { "snake.log".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid { density: default_density() }
    }
}

impl Default for TomlInput {
    fn default() -> Self {
        TomlInput {
            swipe_min_px: default_swipe_min(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            stick_deadzone: default_deadzone(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
            pause: default_pause(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            save_file: default_save_file(),
            log_file: default_log_file(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        GameConfig::from_toml(load_toml(&candidate_dirs()))
    }

    /// Parse a config document. Absent keys take their defaults.
    #[cfg(test)]
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from_toml)
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        // Zero or negative values would stall the clock or the layout
        let positive = |v: f32, fallback: f32| if v > 0.0 { v } else { fallback };

        GameConfig {
            speed: SpeedConfig {
                tick_rate_ms: cfg.speed.tick_rate_ms.max(1),
            },
            grid: GridConfig {
                density: cfg.grid.density.max(1),
            },
            input: InputConfig {
                swipe_min_px: cfg.input.swipe_min_px.max(0.0),
                cell_width_px: positive(cfg.input.cell_width_px, default_cell_width()),
                cell_height_px: positive(cfg.input.cell_height_px, default_cell_height()),
                stick_deadzone: cfg.input.stick_deadzone.clamp(0.0, 0.99),
            },
            gamepad: GamepadConfig {
                confirm: cfg.gamepad.confirm,
                cancel: cfg.gamepad.cancel,
                pause: cfg.gamepad.pause,
            },
            save_file: cfg.general.save_file,
            log_file: cfg.general.log_file,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/snake)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/snake");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
/// Runs before the logger and the terminal are set up, so warnings go to stderr.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    eprintln!("Warning: {} parse error: {e}", path.display());
                    eprintln!("Using default settings.");
                    return TomlConfig::default();
                }
            },
            Err(e) => {
                eprintln!("Warning: could not read {}: {e}", path.display());
            }
        }
    }
    TomlConfig::default()
}
