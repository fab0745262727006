// Ordered player roster: row and column headers of the league table.

use serde::{Deserialize, Serialize};

use crate::error::LeagueError;

/// Prefix of generated player names ("PlayerA", "PlayerB", ...).
pub const DEFAULT_NAME_PREFIX: &str = "Player";

/// The ordered list of player names.
///
/// Order is presentation order. Names double as identity keys into the
/// result store; the roster itself never checks them for uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Roster { names: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of the first player with this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Replace the name at `index`, returning the previous name.
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<String, LeagueError> {
        let len = self.names.len();
        let slot = self
            .names
            .get_mut(index)
            .ok_or(LeagueError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, new_name.to_string()))
    }

    /// Remove the entry at `index`, shifting later entries left.
    pub fn remove(&mut self, index: usize) -> Result<String, LeagueError> {
        if index >= self.names.len() {
            return Err(LeagueError::IndexOutOfRange {
                index,
                len: self.names.len(),
            });
        }
        Ok(self.names.remove(index))
    }

    /// Append a player. Without a name, one is generated from the current
    /// roster size (see [`default_name`]).
    pub fn add(&mut self, name: Option<&str>) -> String {
        let name = match name {
            Some(n) => n.to_string(),
            None => default_name(self.names.len()),
        };
        self.names.push(name.clone());
        name
    }
}

/// Generated name for the player added when the roster holds `count`
/// players: `"Player"` followed by the character `count` code points
/// after `'A'`.
///
/// Past 26 players this runs on into `[`, `\`, `]` and so on; no wrap-around.
pub fn default_name(count: usize) -> String {
    let letter = u32::try_from(count)
        .ok()
        .and_then(|n| n.checked_add('A' as u32))
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    format!("{DEFAULT_NAME_PREFIX}{letter}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
