// Messages exchanged between the TUI and the application task.

use matchgrid_core::{grid_cell, GridCell, MatchResult, ResultStore};

/// Commands sent from the TUI to the application task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Rename the player in row `index`.
    Rename { index: usize, name: String },
    /// Remove the player in row `index`.
    Remove { index: usize },
    /// Append a player; `None` asks for a generated name.
    AddPlayer { name: Option<String> },
    /// Raw score text for `player_a` against `player_b`, forwarded verbatim.
    SubmitResult {
        player_a: String,
        player_b: String,
        raw: String,
    },
    Quit,
}

/// Updates pushed from the application task to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Full copy of the table after a change.
    Snapshot(Box<LeagueSnapshot>),
    /// Short message for the status bar.
    Notice(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// What the grid needs to draw itself: ordered names and a result lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueSnapshot {
    pub title: String,
    pub players: Vec<String>,
    pub results: ResultStore,
}

impl LeagueSnapshot {
    pub fn get_result(&self, row_name: &str, col_name: &str) -> Option<MatchResult> {
        self.results.get_result(row_name, col_name)
    }

    /// Content of the cell at (`row`, `col`), `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<GridCell> {
        grid_cell(&self.players, &self.results, row, col)
    }
}
