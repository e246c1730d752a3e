//! Snapshot assembly and the activity calculation core

pub mod achievements;
pub mod snapshot;
pub mod stats;
pub mod streak;
pub mod window;

#[cfg(test)]
mod stats_test;

pub use snapshot::{fetch_snapshot, RefreshService, SnapshotCache};
