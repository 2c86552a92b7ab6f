// file: src/github/mod.rs
// description: GitHub REST API access
// reference: internal module structure

pub mod client;

pub use client::{API_VERSION, GithubClient};
