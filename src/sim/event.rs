/// Events emitted by session transitions and ticks.
/// The presentation layer consumes these for sound and messages.

use crate::domain::grid::Coord;

#[allow(dead_code)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    FoodEaten { at: Coord },
    GameOver { score: u32, new_high: bool },
    BoardFilled { score: u32 },
    Paused,
    Resumed,
    Saved,
    SaveFailed,
    Restored,
    NothingToRestore,
    MenuMoved,
    SettingChanged,
    ExitRequested,
}
