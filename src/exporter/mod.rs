// file: src/exporter/mod.rs
// description: manifest output module exports
// reference: internal module structure

pub mod json;

pub use json::ManifestWriter;
