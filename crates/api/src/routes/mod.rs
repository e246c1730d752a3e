//! API routes

pub mod achievements;
pub mod dashboard;
pub mod health;
pub mod stats;
pub mod streak;
