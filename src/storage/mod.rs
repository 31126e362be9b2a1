//! File-backed caches under the data directory.
//!
//! - `matches`: historical and current-season match tables
//! - `points_table`: per-season standings snapshots
//! - `stat_cache`: per-category player leaderboards
//! - `squads`: franchise squad lists

pub mod matches;
pub mod points_table;
pub mod squads;
pub mod stat_cache;

pub use matches::RawTable;
pub use points_table::{PointsRow, PointsTableStore};
pub use squads::SquadStore;
pub use stat_cache::{StatCache, StatTable};
