// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod manifest;
pub mod remote_repository;

pub use manifest::{
    ArchiveOptions, HttpOptions, Manifest, RepositoryEntry, RepositoryOptions, VCS_TYPE,
};
pub use remote_repository::RemoteRepository;
