// file: src/utils/validation.rs
// description: input validation for configuration values and output paths
// reference: input validation patterns

use crate::error::{Result, SyncError};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SyncError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// GitHub logins are alphanumeric with single inner hyphens; underscores
    /// and dots are tolerated for enterprise installs.
    pub fn validate_organization(organization: &str) -> Result<()> {
        let valid = !organization.is_empty()
            && organization
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !organization.starts_with('-');

        if !valid {
            return Err(SyncError::Validation(format!(
                "Invalid organization name: {}",
                organization
            )));
        }
        Ok(())
    }

    pub fn validate_output_path(path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(SyncError::Validation(format!(
                "Output path is a directory: {}",
                path.display()
            )));
        }
        Ok(())
    }
}
