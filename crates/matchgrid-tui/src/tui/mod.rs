// TUI: grid view, prompts, and the render/input loop.
//
// The TUI keeps a `ViewState` holding the last snapshot from the application
// task plus purely local state (cursor, open prompt, score editor). Commands
// go out over an mpsc channel; snapshots come back and replace the copy.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::protocol::{LeagueSnapshot, Notice, UiUpdate, UserCommand};
use layout::{build_layout, AppLayout};
use matchgrid_core::{GridCell, MatchResult};

// ---------------------------------------------------------------------------
// Local editing state
// ---------------------------------------------------------------------------

/// A one-line text prompt below the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Editing the name of the player in row `index`.
    Rename { index: usize, buffer: String },
    /// Typing the name of a new player; empty means "generate one".
    AddPlayer { buffer: String },
}

/// The score dialog: which pair is being edited and the text typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEditor {
    pub player_a: String,
    pub player_b: String,
    pub draft: String,
}

impl ScoreEditor {
    /// Open the dialog for the cell at (`row`, `col`), pre-filled with the
    /// stored result. Diagonal and out-of-range cells cannot be edited.
    pub fn open(snapshot: &LeagueSnapshot, row: usize, col: usize) -> Option<ScoreEditor> {
        let draft = match snapshot.cell(row, col)? {
            GridCell::Diagonal => return None,
            GridCell::Played(result) => result.to_string(),
            GridCell::Unplayed => String::new(),
        };
        Some(ScoreEditor {
            player_a: snapshot.players[row].clone(),
            player_b: snapshot.players[col].clone(),
            draft,
        })
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the latest league snapshot plus cursor and editors.
#[derive(Debug, Default)]
pub struct ViewState {
    pub snapshot: LeagueSnapshot,
    /// Selected row (the row player).
    pub cursor_row: usize,
    /// Selected column (the opponent).
    pub cursor_col: usize,
    pub prompt: Option<Prompt>,
    pub score_editor: Option<ScoreEditor>,
    /// Last message from the application task, cleared on the next key press.
    pub notice: Option<Notice>,
    pub confirm_quit: bool,
}

impl ViewState {
    /// Replace the snapshot and keep the cursor inside the grid.
    pub fn apply_snapshot(&mut self, snapshot: LeagueSnapshot) {
        self.snapshot = snapshot;
        let last = self.snapshot.players.len().saturating_sub(1);
        self.cursor_row = self.cursor_row.min(last);
        self.cursor_col = self.cursor_col.min(last);
    }

    /// Names of the selected pair, `None` on an empty grid.
    pub fn selected_pair(&self) -> Option<(&str, &str)> {
        let row = self.snapshot.players.get(self.cursor_row)?;
        let col = self.snapshot.players.get(self.cursor_col)?;
        Some((row.as_str(), col.as_str()))
    }

    /// True when the cursor sits on a cell that cannot hold a result.
    pub fn on_diagonal(&self) -> bool {
        matches!(
            self.snapshot.cell(self.cursor_row, self.cursor_col),
            Some(GridCell::Diagonal)
        )
    }

    pub fn selected_result(&self) -> Option<MatchResult> {
        let (row, col) = self.selected_pair()?;
        if self.on_diagonal() {
            return None;
        }
        self.snapshot.get_result(row, col)
    }
}

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::Notice(notice) => state.notice = Some(notice),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::grid::render(frame, layout.grid, state);
    widgets::prompt::render(frame, layout.prompt, state);
    render_help_bar(frame, &layout, state);

    if let Some(editor) = &state.score_editor {
        widgets::score_modal::render(frame, frame.area(), editor);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

/// Key hints for whatever currently has focus.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        " y:Quit | n/Esc:Stay"
    } else if state.score_editor.is_some() {
        " Enter:Save (empty clears) | Esc:Cancel"
    } else if state.prompt.is_some() {
        " Enter:Confirm | Esc:Cancel"
    } else {
        " Arrows/hjkl:Move | Enter:Score | x:Clear | r:Rename | a:Add | d:Remove | q:Quit"
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the application task
/// goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    render_interval: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal before the default hook prints a panic message.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(render_interval);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed");
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match input::handle_key(key_event, &mut view_state) {
                            Some(UserCommand::Quit) => {
                                let _ = cmd_tx.send(UserCommand::Quit).await;
                                break;
                            }
                            Some(cmd) => {
                                if cmd_tx.send(cmd).await.is_err() {
                                    warn!("Application task stopped accepting commands");
                                    break;
                                }
                            }
                            None => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
