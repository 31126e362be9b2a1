//! Type-safe wrappers and enums for IPL data.

pub mod category;
pub mod time;
pub mod toss;

pub use category::{StatCategory, StatGroup};
pub use time::Season;
pub use toss::TossDecision;
