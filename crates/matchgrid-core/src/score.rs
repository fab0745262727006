// Match results and the `"<int> - <int>"` score text format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LeagueError;

/// Score of one match from the row player's point of view:
/// `(score_for, score_against)`.
///
/// Serializes as a two-element array, e.g. `[3, 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult(pub u32, pub u32);

impl MatchResult {
    pub fn score_for(&self) -> u32 {
        self.0
    }

    pub fn score_against(&self) -> u32 {
        self.1
    }

    /// The same match seen from the opponent's side.
    pub fn reversed(&self) -> MatchResult {
        MatchResult(self.1, self.0)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.0, self.1)
    }
}

/// How score text that is not a clean `"<int> - <int>"` is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreParsing {
    /// Unparseable halves become 0.
    #[default]
    Lenient,
    /// Anything but two plain integers separated by one hyphen is rejected.
    Strict,
}

/// Parse raw score text.
///
/// Returns `Ok(None)` for empty or all-whitespace input, which means
/// "clear the result". Otherwise the text is split on `-` and each side is
/// trimmed. In lenient mode each side contributes its leading run of digits
/// (`"3abc"` is 3, `"x"` is 0, a missing side is 0) and anything after a
/// second hyphen is ignored.
pub fn parse_score(raw: &str, mode: ScoreParsing) -> Result<Option<MatchResult>, LeagueError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let mut parts = raw.split('-').map(str::trim);
    let first = parts.next().unwrap_or("");
    let second = parts.next().unwrap_or("");

    match mode {
        ScoreParsing::Lenient => Ok(Some(MatchResult(lenient_int(first), lenient_int(second)))),
        ScoreParsing::Strict => {
            let invalid = || LeagueError::InvalidScore {
                input: raw.to_string(),
            };
            if parts.next().is_some() {
                return Err(invalid());
            }
            let a = strict_int(first).ok_or_else(invalid)?;
            let b = strict_int(second).ok_or_else(invalid)?;
            Ok(Some(MatchResult(a, b)))
        }
    }
}

/// Leading digits of `s` (after an optional `+`), 0 when there are none.
/// Values too large for `u32` saturate.
fn lenient_int(s: &str) -> u32 {
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits_end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let digits = &s[..digits_end];
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

fn strict_int(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
