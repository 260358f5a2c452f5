use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Refresh,
    Error(String),
    Help,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    NextTable,
    PreviousTable,
    NextColumn,
    PreviousColumn,
    /// Sort the focused column ascending (`_up` selection).
    SortAscending,
    /// Sort the focused column descending (`_down` selection).
    SortDescending,
    /// Sort a named column; emitted by clicks on the header arrows.
    SortColumn {
        key: String,
        ascending: bool,
    },
    SystemMessage(String),
    Key(KeyEvent),
}
