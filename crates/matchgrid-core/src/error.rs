// Error types for roster and result store operations.

use thiserror::Error;

/// Errors raised by the league state model.
///
/// Malformed score text is not an error under the default lenient parsing;
/// `InvalidScore` only appears in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    #[error("player index {index} out of range (roster has {len} players)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot record a result of {name} against themselves")]
    SelfMatch { name: String },

    #[error("a player named `{name}` already exists")]
    DuplicateName { name: String },

    #[error("invalid score `{input}`, expected `<int> - <int>`")]
    InvalidScore { input: String },
}
