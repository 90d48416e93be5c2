pub mod asset;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod report;
pub mod standings;
pub mod store;
pub mod table;

pub use error::{DataError, ErrorKind};
pub use model::{GoalCell, LeagueTables, Match, MatchStatus, Team};
pub use standings::{StandingsEngine, StandingsRow, compute_standings};
