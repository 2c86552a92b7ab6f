// file: src/exporter/json.rs
// description: writes the satis.json manifest in Composer's pretty-printed layout
// reference: https://docs.rs/serde_json/latest/serde_json/ser/struct.PrettyFormatter.html

use crate::error::{Result, SyncError};
use crate::models::Manifest;
use crate::utils::Validator;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone)]
pub struct ManifestWriter {
    path: PathBuf,
}

impl ManifestWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Four-space indentation, slashes and unicode left unescaped, trailing
    /// newline.
    pub fn render(manifest: &Manifest) -> Result<String> {
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        manifest.serialize(&mut serializer)?;
        buffer.push(b'\n');

        String::from_utf8(buffer)
            .map_err(|e| SyncError::Validation(format!("Rendered manifest is not UTF-8: {}", e)))
    }

    /// Replaces the file at `path` with the rendered manifest, creating
    /// missing parent directories.
    pub fn write(&self, manifest: &Manifest) -> Result<()> {
        let content = Self::render(manifest)?;

        Validator::validate_output_path(&self.path)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|source| SyncError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, content).map_err(|source| SyncError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!(
            "Wrote {} repositories to {}",
            manifest.repositories.len(),
            self.path.display()
        );
        Ok(())
    }
}
