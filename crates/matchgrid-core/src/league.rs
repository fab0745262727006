// League state: roster and result store mutated in lockstep.
//
// `League` owns both collections privately. The `apply_*` methods (or
// `apply` with a `LeagueCommand`) are the only way to mutate them, so a
// rename or removal is never visible with only one side updated.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LeagueError;
use crate::results::ResultStore;
use crate::roster::Roster;
use crate::score::{MatchResult, ScoreParsing};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do when an add or rename would create a second player with the
/// same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Accept it. Both roster entries then share one result-store identity.
    #[default]
    Allow,
    /// Fail with `LeagueError::DuplicateName`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeagueOptions {
    pub duplicate_names: DuplicatePolicy,
    pub score_parsing: ScoreParsing,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// One user action against the league.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeagueCommand {
    Rename { index: usize, name: String },
    Remove { index: usize },
    AddPlayer { name: Option<String> },
    SetResult { player_a: String, player_b: String, raw: String },
}

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeagueChange {
    Renamed { old: String, new: String },
    Removed { name: String },
    Added { name: String },
    ResultSet { player_a: String, player_b: String, result: MatchResult },
    ResultCleared { player_a: String, player_b: String },
}

/// What a grid cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// A player against themselves; never editable.
    Diagonal,
    Played(MatchResult),
    Unplayed,
}

/// Content of the cell at (`row`, `col`) of a table with `players` as
/// headers, `None` when either index is outside it. Two rows sharing a name
/// key the same results, so their crossing is a diagonal too.
pub fn grid_cell(
    players: &[String],
    results: &ResultStore,
    row: usize,
    col: usize,
) -> Option<GridCell> {
    let row_name = players.get(row)?;
    let col_name = players.get(col)?;
    if row == col || row_name == col_name {
        return Some(GridCell::Diagonal);
    }
    Some(match results.get_result(row_name, col_name) {
        Some(result) => GridCell::Played(result),
        None => GridCell::Unplayed,
    })
}

// ---------------------------------------------------------------------------
// League
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct League {
    roster: Roster,
    results: ResultStore,
    options: LeagueOptions,
}

impl League {
    pub fn new(options: LeagueOptions) -> Self {
        League {
            roster: Roster::new(),
            results: ResultStore::new(),
            options,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn options(&self) -> LeagueOptions {
        self.options
    }

    pub fn players(&self) -> &[String] {
        self.roster.names()
    }

    pub fn get_result(&self, player_a: &str, player_b: &str) -> Option<MatchResult> {
        self.results.get_result(player_a, player_b)
    }

    /// Content of the cell at (`row`, `col`), or `None` when either index
    /// is outside the roster.
    pub fn grid_cell(&self, row: usize, col: usize) -> Option<GridCell> {
        grid_cell(self.roster.names(), &self.results, row, col)
    }

    /// Apply a command, dispatching to the matching `apply_*` method.
    pub fn apply(&mut self, command: LeagueCommand) -> Result<LeagueChange, LeagueError> {
        match command {
            LeagueCommand::Rename { index, name } => {
                let old = self.apply_rename(index, &name)?;
                Ok(LeagueChange::Renamed { old, new: name })
            }
            LeagueCommand::Remove { index } => {
                let name = self.apply_remove(index)?;
                Ok(LeagueChange::Removed { name })
            }
            LeagueCommand::AddPlayer { name } => {
                let name = self.apply_add(name.as_deref())?;
                Ok(LeagueChange::Added { name })
            }
            LeagueCommand::SetResult {
                player_a,
                player_b,
                raw,
            } => match self.apply_set_result(&player_a, &player_b, &raw)? {
                Some(result) => Ok(LeagueChange::ResultSet {
                    player_a,
                    player_b,
                    result,
                }),
                None => Ok(LeagueChange::ResultCleared { player_a, player_b }),
            },
        }
    }

    /// Rename the player at `index` and move their results to the new name.
    /// Returns the old name.
    pub fn apply_rename(&mut self, index: usize, new_name: &str) -> Result<String, LeagueError> {
        let len = self.roster.len();
        let old_name = self
            .roster
            .get(index)
            .ok_or(LeagueError::IndexOutOfRange { index, len })?
            .to_string();

        if old_name == new_name {
            return Ok(old_name);
        }
        self.check_duplicate(new_name)?;

        self.roster.rename(index, new_name)?;
        self.results.migrate_key(&old_name, new_name);
        info!("Renamed player {} -> {}", old_name, new_name);
        Ok(old_name)
    }

    /// Remove the player at `index` together with all of their results.
    /// Returns the removed name.
    pub fn apply_remove(&mut self, index: usize) -> Result<String, LeagueError> {
        let name = self.roster.remove(index)?;
        if self.roster.contains(&name) {
            debug!("Removed one of several players named {}; shared results purged", name);
        }
        self.results.purge(&name);
        info!("Removed player {}", name);
        Ok(name)
    }

    /// Append a player, generating a name when `name` is `None`.
    pub fn apply_add(&mut self, name: Option<&str>) -> Result<String, LeagueError> {
        if let Some(n) = name {
            self.check_duplicate(n)?;
        } else if self.options.duplicate_names == DuplicatePolicy::Reject {
            let generated = crate::roster::default_name(self.roster.len());
            self.check_duplicate(&generated)?;
        }
        let added = self.roster.add(name);
        info!("Added player {}", added);
        Ok(added)
    }

    /// Record (or clear, for blank `raw`) the result of `player_a` against
    /// `player_b`.
    pub fn apply_set_result(
        &mut self,
        player_a: &str,
        player_b: &str,
        raw: &str,
    ) -> Result<Option<MatchResult>, LeagueError> {
        let stored =
            self.results
                .set_result(player_a, player_b, raw, self.options.score_parsing)?;
        match stored {
            Some(result) => info!("Result {} vs {}: {}", player_a, player_b, result),
            None => info!("Result {} vs {} cleared", player_a, player_b),
        }
        Ok(stored)
    }

    fn check_duplicate(&self, name: &str) -> Result<(), LeagueError> {
        if self.options.duplicate_names == DuplicatePolicy::Reject && self.roster.contains(name) {
            return Err(LeagueError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Serializable copy of the current table.
    pub fn export(&self) -> LeagueExport {
        LeagueExport {
            players: self.roster.clone(),
            results: self.results.clone(),
        }
    }
}

/// Players and results as written by the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueExport {
    pub players: Roster,
    pub results: ResultStore,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
