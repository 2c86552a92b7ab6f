// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod github;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use config::{ArchiveConfig, SyncConfig};
pub use error::{Result, SyncError};
pub use exporter::ManifestWriter;
pub use github::GithubClient;
pub use models::{Manifest, RemoteRepository, RepositoryEntry};
pub use pipeline::{SyncOperation, SyncReport};
pub use utils::Validator;
