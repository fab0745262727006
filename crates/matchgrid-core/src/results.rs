// Symmetric, name-keyed store of pairwise match results.
//
// Invariant: `store[a][b] == r` exists iff `store[b][a] == r.reversed()`
// exists, and no player is ever paired with themselves. Every public
// mutation below re-establishes it before returning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LeagueError;
use crate::score::{parse_score, MatchResult, ScoreParsing};

type Opponents = BTreeMap<String, MatchResult>;

/// Pairwise results keyed by current player names.
///
/// Serializes to `{"A": {"C": [3, 2]}, "C": {"A": [2, 3]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    entries: BTreeMap<String, Opponents>,
}

impl ResultStore {
    pub fn new() -> Self {
        ResultStore {
            entries: BTreeMap::new(),
        }
    }

    /// Result of `player_a` against `player_b`, `None` if never played.
    pub fn get_result(&self, player_a: &str, player_b: &str) -> Option<MatchResult> {
        self.entries
            .get(player_a)
            .and_then(|opponents| opponents.get(player_b))
            .copied()
    }

    /// Parse `raw` and record it for both players, or clear the pair when
    /// `raw` is blank.
    ///
    /// Returns the stored result from `player_a`'s side, or `None` after a
    /// clear.
    pub fn set_result(
        &mut self,
        player_a: &str,
        player_b: &str,
        raw: &str,
        parsing: ScoreParsing,
    ) -> Result<Option<MatchResult>, LeagueError> {
        if player_a == player_b {
            return Err(LeagueError::SelfMatch {
                name: player_a.to_string(),
            });
        }
        match parse_score(raw, parsing)? {
            Some(result) => {
                self.insert_pair(player_a, player_b, result);
                Ok(Some(result))
            }
            None => {
                self.clear_pair(player_a, player_b);
                Ok(None)
            }
        }
    }

    /// Record `result` for `a` against `b` and its reverse for `b` against `a`.
    fn insert_pair(&mut self, a: &str, b: &str, result: MatchResult) {
        self.entries
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), result);
        self.entries
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), result.reversed());
        debug!("Recorded {} vs {}: {}", a, b, result);
    }

    /// Remove both directions of a pair. Clearing an unplayed pair is a no-op.
    fn clear_pair(&mut self, a: &str, b: &str) {
        self.remove_nested(a, b);
        self.remove_nested(b, a);
        debug!("Cleared {} vs {}", a, b);
    }

    fn remove_nested(&mut self, owner: &str, opponent: &str) {
        if let Some(opponents) = self.entries.get_mut(owner) {
            opponents.remove(opponent);
            if opponents.is_empty() {
                self.entries.remove(owner);
            }
        }
    }

    /// Relocate every entry keyed by `old_name` to `new_name`, both as a
    /// top-level key and as an opponent key under every other player.
    ///
    /// Calling it again with the same names is a no-op. If `new_name`
    /// already has results, the two sets merge and the entries moved from
    /// `old_name` win; a result between the two names themselves would
    /// become a self pair and is dropped.
    pub fn migrate_key(&mut self, old_name: &str, new_name: &str) {
        if old_name == new_name {
            return;
        }

        let collides = self.entries.contains_key(new_name);

        if let Some(moved) = self.entries.remove(old_name) {
            let target = self.entries.entry(new_name.to_string()).or_default();
            target.extend(moved);
        }

        for (owner, opponents) in self.entries.iter_mut() {
            if owner == new_name {
                // Entries of the renamed player itself hold no old_name key
                // except a former old/new pair, handled below.
                continue;
            }
            if let Some(result) = opponents.remove(old_name) {
                opponents.insert(new_name.to_string(), result);
            }
        }

        if let Some(own) = self.entries.get_mut(new_name) {
            own.remove(old_name);
            own.remove(new_name);
            if own.is_empty() {
                self.entries.remove(new_name);
            }
        }

        if collides {
            warn!(
                "Renamed {} onto existing name {}; results merged",
                old_name, new_name
            );
        }
    }

    /// Remove every entry referencing `name`.
    pub fn purge(&mut self, name: &str) {
        self.entries.remove(name);
        self.entries.retain(|_, opponents| {
            opponents.remove(name);
            !opponents.is_empty()
        });
    }

    /// Whether `name` appears anywhere in the store, as a player or opponent.
    pub fn references(&self, name: &str) -> bool {
        self.entries.contains_key(name)
            || self.entries.values().any(|opps| opps.contains_key(name))
    }

    /// Number of distinct played pairs.
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate every stored direction as `(player, opponent, result)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, MatchResult)> {
        self.entries.iter().flat_map(|(player, opponents)| {
            opponents
                .iter()
                .map(move |(opponent, result)| (player.as_str(), opponent.as_str(), *result))
        })
    }

    /// Check the symmetry and no-self-pair invariants.
    pub fn is_consistent(&self) -> bool {
        self.iter().all(|(a, b, result)| {
            a != b && self.get_result(b, a) == Some(result.reversed())
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
