//! GitHub GraphQL API client for fetching the viewer's activity

pub mod client;

pub use client::{ClientError, GitHubClient};
