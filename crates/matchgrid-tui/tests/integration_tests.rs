// Integration tests for the league table editor.
//
// These drive the application task over its mpsc channels exactly as the
// TUI does, starting from the built-in configuration, and feed key presses
// through the TUI input handler.

use matchgrid_core::{LeagueExport, MatchResult};
use matchgrid_tui::app::{self, AppState};
use matchgrid_tui::config::Config;
use matchgrid_tui::protocol::*;
use matchgrid_tui::tui::{input, ViewState};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// ===========================================================================
// Test helpers
// ===========================================================================

struct Harness {
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    handle: JoinHandle<anyhow::Result<AppState>>,
    view: ViewState,
}

impl Harness {
    async fn start() -> Harness {
        let config = Config::builtin().expect("built-in config is valid");
        let state = AppState::new(config).expect("built-in seeds apply");
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(64);
        let handle = tokio::spawn(app::run(cmd_rx, ui_tx, state));
        let mut harness = Harness {
            cmd_tx,
            ui_rx,
            handle,
            view: ViewState::default(),
        };
        harness.pump().await;
        harness
    }

    /// Receive updates until the next snapshot.
    async fn pump(&mut self) {
        loop {
            match self.ui_rx.recv().await.expect("ui channel closed") {
                UiUpdate::Snapshot(snapshot) => {
                    self.view.apply_snapshot(*snapshot);
                    break;
                }
                UiUpdate::Notice(notice) => self.view.notice = Some(notice),
            }
        }
    }

    /// Receive the reply to one command: an applied command sends a
    /// snapshot then a notice, a rejected one only a notice.
    async fn await_reply(&mut self) {
        loop {
            match self.ui_rx.recv().await.expect("ui channel closed") {
                UiUpdate::Snapshot(snapshot) => self.view.apply_snapshot(*snapshot),
                UiUpdate::Notice(notice) => {
                    self.view.notice = Some(notice);
                    break;
                }
            }
        }
    }

    /// Press a key; forward the resulting command, if any, and wait for
    /// the reply.
    async fn press(&mut self, code: KeyCode) {
        let event = KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        if let Some(cmd) = input::handle_key(event, &mut self.view) {
            self.cmd_tx.send(cmd).await.unwrap();
            self.await_reply().await;
        }
    }

    async fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c)).await;
        }
    }

    async fn quit(self) -> AppState {
        self.cmd_tx.send(UserCommand::Quit).await.unwrap();
        self.handle.await.unwrap().unwrap()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn builtin_config_seeds_four_players_and_one_result() {
    let harness = Harness::start().await;
    let snapshot = &harness.view.snapshot;
    assert_eq!(
        snapshot.players,
        vec!["PlayerA", "PlayerB", "PlayerC", "PlayerD"]
    );
    assert_eq!(
        snapshot.get_result("PlayerA", "PlayerC"),
        Some(MatchResult(3, 2))
    );
    assert_eq!(
        snapshot.get_result("PlayerC", "PlayerA"),
        Some(MatchResult(2, 3))
    );
    assert_eq!(snapshot.results.pair_count(), 1);
    harness.quit().await;
}

#[tokio::test]
async fn enter_score_through_dialog() {
    let mut harness = Harness::start().await;
    // Move to PlayerB vs PlayerD.
    harness.press(KeyCode::Down).await;
    harness.press(KeyCode::Right).await;
    harness.press(KeyCode::Right).await;
    harness.press(KeyCode::Right).await;
    harness.press(KeyCode::Enter).await;
    harness.type_text("4 - 1").await;
    harness.press(KeyCode::Enter).await;

    let snapshot = &harness.view.snapshot;
    assert_eq!(
        snapshot.get_result("PlayerB", "PlayerD"),
        Some(MatchResult(4, 1))
    );
    assert_eq!(
        snapshot.get_result("PlayerD", "PlayerB"),
        Some(MatchResult(1, 4))
    );
    assert!(snapshot.results.is_consistent());
    harness.quit().await;
}

#[tokio::test]
async fn lenient_score_entry_defaults_missing_side() {
    let mut harness = Harness::start().await;
    harness.press(KeyCode::Right).await;
    harness.press(KeyCode::Enter).await;
    harness.type_text("x - 4").await;
    harness.press(KeyCode::Enter).await;
    assert_eq!(
        harness.view.snapshot.get_result("PlayerA", "PlayerB"),
        Some(MatchResult(0, 4))
    );
    harness.quit().await;
}

#[tokio::test]
async fn clearing_dialog_removes_both_directions() {
    let mut harness = Harness::start().await;
    harness.press(KeyCode::Right).await;
    harness.press(KeyCode::Right).await;
    harness.press(KeyCode::Enter).await;
    for _ in 0..5 {
        harness.press(KeyCode::Backspace).await;
    }
    harness.press(KeyCode::Enter).await;
    let snapshot = &harness.view.snapshot;
    assert_eq!(snapshot.get_result("PlayerA", "PlayerC"), None);
    assert_eq!(snapshot.get_result("PlayerC", "PlayerA"), None);
    assert!(snapshot.results.is_empty());
    harness.quit().await;
}

#[tokio::test]
async fn rename_keeps_results_under_new_name() {
    let mut harness = Harness::start().await;
    harness.press(KeyCode::Char('r')).await;
    for _ in 0.."PlayerA".len() {
        harness.press(KeyCode::Backspace).await;
    }
    harness.type_text("Alice").await;
    harness.press(KeyCode::Enter).await;

    let snapshot = &harness.view.snapshot;
    assert_eq!(snapshot.players[0], "Alice");
    assert_eq!(
        snapshot.get_result("Alice", "PlayerC"),
        Some(MatchResult(3, 2))
    );
    assert_eq!(
        snapshot.get_result("PlayerC", "Alice"),
        Some(MatchResult(2, 3))
    );
    assert_eq!(snapshot.get_result("PlayerA", "PlayerC"), None);
    assert_eq!(harness.view.notice.as_ref().unwrap().text, "Renamed PlayerA to Alice");
    harness.quit().await;
}

#[tokio::test]
async fn rejected_command_reports_error_and_keeps_state() {
    let mut harness = Harness::start().await;
    harness.press(KeyCode::Char('r')).await;
    for _ in 0.."PlayerA".len() {
        harness.press(KeyCode::Backspace).await;
    }
    harness.type_text("PlayerB").await;
    harness.press(KeyCode::Enter).await;

    // Duplicates are allowed by default, so this succeeds and merges.
    assert_eq!(
        harness.view.snapshot.players,
        vec!["PlayerB", "PlayerB", "PlayerC", "PlayerD"]
    );
    assert!(harness.view.snapshot.results.is_consistent());

    harness.cmd_tx.send(UserCommand::Remove { index: 42 }).await.unwrap();
    harness.await_reply().await;
    let notice = harness.view.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(harness.view.snapshot.players.len(), 4);
    harness.quit().await;
}

#[tokio::test]
async fn remove_purges_results() {
    let mut harness = Harness::start().await;
    harness.press(KeyCode::Down).await;
    harness.press(KeyCode::Down).await;
    harness.press(KeyCode::Char('d')).await;

    let snapshot = &harness.view.snapshot;
    assert_eq!(snapshot.players, vec!["PlayerA", "PlayerB", "PlayerD"]);
    assert!(snapshot.results.is_empty());
    harness.quit().await;
}

#[tokio::test]
async fn add_with_empty_name_generates_default() {
    let mut harness = Harness::start().await;
    harness.press(KeyCode::Char('a')).await;
    harness.press(KeyCode::Enter).await;
    assert_eq!(harness.view.snapshot.players[4], "PlayerE");

    harness.press(KeyCode::Char('a')).await;
    harness.type_text(" Zed ").await;
    harness.press(KeyCode::Enter).await;
    assert_eq!(harness.view.snapshot.players[5], "Zed");
    harness.quit().await;
}

#[tokio::test]
async fn final_state_exports_as_json() {
    let mut harness = Harness::start().await;
    harness.press(KeyCode::Char('a')).await;
    harness.type_text("Eve").await;
    harness.press(KeyCode::Enter).await;
    let state = harness.quit().await;

    let json = serde_json::to_value(state.league.export()).unwrap();
    assert_eq!(json["players"][4], "Eve");
    assert_eq!(json["results"]["PlayerA"]["PlayerC"], serde_json::json!([3, 2]));
    assert_eq!(json["results"]["PlayerC"]["PlayerA"], serde_json::json!([2, 3]));

    let back: LeagueExport = serde_json::from_value(json).unwrap();
    assert_eq!(back.players.len(), 5);
}
