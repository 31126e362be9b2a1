//! Command implementations for the IPL statistics CLI

pub mod common;
pub mod playoffs;
pub mod points_table;
pub mod prediction;
pub mod squads;
pub mod stats;
pub mod teams;
