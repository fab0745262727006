// Application state and orchestration logic.
//
// A single task owns the `League` and applies user commands one at a time,
// each to completion, then pushes a fresh snapshot to the TUI. Nothing else
// mutates the league, so the TUI never sees a half-applied rename or removal.

use matchgrid_core::{League, LeagueChange, LeagueCommand, LeagueError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{Config, LeagueConfig};
use crate::protocol::{LeagueSnapshot, Notice, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub league: League,
}

impl AppState {
    /// Build the initial state from the configured players and results.
    pub fn new(config: Config) -> Result<Self, LeagueError> {
        let league = build_league(&config.league)?;
        Ok(AppState { config, league })
    }

    /// Copy of everything the TUI renders.
    pub fn build_snapshot(&self) -> LeagueSnapshot {
        LeagueSnapshot {
            title: self.config.league.title.clone(),
            players: self.league.players().to_vec(),
            results: self.league.results().clone(),
        }
    }

    /// Apply one command to the league. `Quit` is not a league command and
    /// is handled by the event loop.
    pub fn apply_command(&mut self, cmd: UserCommand) -> Option<Result<LeagueChange, LeagueError>> {
        let command = match cmd {
            UserCommand::Rename { index, name } => LeagueCommand::Rename { index, name },
            UserCommand::Remove { index } => LeagueCommand::Remove { index },
            UserCommand::AddPlayer { name } => LeagueCommand::AddPlayer { name },
            UserCommand::SubmitResult {
                player_a,
                player_b,
                raw,
            } => LeagueCommand::SetResult {
                player_a,
                player_b,
                raw,
            },
            UserCommand::Quit => return None,
        };
        Some(self.league.apply(command))
    }
}

/// Create a league holding the configured players, then record each
/// configured result through the normal mutation path.
pub fn build_league(config: &LeagueConfig) -> Result<League, LeagueError> {
    let mut league = League::new(config.options());
    for name in &config.players {
        league.apply_add(Some(name))?;
    }
    for seed in &config.results {
        league.apply_set_result(&seed.home, &seed.away, &seed.score)?;
    }
    debug!(
        "Seeded league with {} players and {} results",
        league.players().len(),
        league.results().pair_count()
    );
    Ok(league)
}

/// One-line status bar text for an applied change.
pub fn describe_change(change: &LeagueChange) -> String {
    match change {
        LeagueChange::Renamed { old, new } => format!("Renamed {old} to {new}"),
        LeagueChange::Removed { name } => format!("Removed {name}"),
        LeagueChange::Added { name } => format!("Added {name}"),
        LeagueChange::ResultSet {
            player_a,
            player_b,
            result,
        } => format!("{player_a} vs {player_b}: {result}"),
        LeagueChange::ResultCleared { player_a, player_b } => {
            format!("Cleared {player_a} vs {player_b}")
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application event loop until `Quit` arrives or the command
/// channel closes. Returns the final state.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<AppState> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.build_snapshot())))
        .await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => handle_user_command(&mut state, cmd, &ui_tx).await,
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(state)
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    debug!("Handling {:?}", cmd);
    match state.apply_command(cmd) {
        Some(Ok(change)) => {
            let snapshot = state.build_snapshot();
            let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await;
            let _ = ui_tx
                .send(UiUpdate::Notice(Notice::info(describe_change(&change))))
                .await;
        }
        Some(Err(e)) => {
            warn!("Command rejected: {}", e);
            let _ = ui_tx.send(UiUpdate::Notice(Notice::error(e.to_string()))).await;
        }
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
