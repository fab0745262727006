// League table state model: an ordered roster of player names and a
// symmetric, name-keyed store of head-to-head results kept consistent with it.

pub mod error;
pub mod league;
pub mod results;
pub mod roster;
pub mod score;

pub use error::LeagueError;
pub use league::{
    grid_cell, DuplicatePolicy, GridCell, League, LeagueChange, LeagueCommand, LeagueExport,
    LeagueOptions,
};
pub use results::ResultStore;
pub use roster::Roster;
pub use score::{MatchResult, ScoreParsing};
