// file: src/config.rs
// description: application configuration built from environment variables and .env files
// reference: https://docs.rs/config

use crate::error::{Result, SyncError};
use crate::utils::Validator;
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_ARCHIVE_DIRECTORY: &str = "dist";
pub const DEFAULT_ARCHIVE_FORMAT: &str = "zip";

const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
const GITHUB_ORGANIZATION: &str = "GITHUB_ORGANIZATION";
const GITHUB_REPOSITORY_NAME: &str = "GITHUB_REPOSITORY_NAME";
const GITHUB_ORGANIZATION_HOMEPAGE: &str = "GITHUB_ORGANIZATION_HOMEPAGE";
const SATIS_CONFIG_FILE: &str = "SATIS_CONFIG_FILE";
const SATIS_CONFIG_REQUIRE_ALL: &str = "SATIS_CONFIG_REQUIRE_ALL";
const SATIS_CONFIG_OUTPUT_HTML: &str = "SATIS_CONFIG_OUTPUT_HTML";
const SATIS_CONFIG_ARCHIVE_SKIP_DEV: &str = "SATIS_CONFIG_ARCHIVE_SKIP_DEV";

/// Every variable the tool reads. Nothing else in the environment is looked at.
pub const VARIABLES: [&str; 11] = [
    GITHUB_TOKEN,
    GITHUB_ORGANIZATION,
    GITHUB_REPOSITORY_NAME,
    GITHUB_ORGANIZATION_HOMEPAGE,
    "GITHUB_API_URL",
    SATIS_CONFIG_FILE,
    SATIS_CONFIG_REQUIRE_ALL,
    SATIS_CONFIG_OUTPUT_HTML,
    "SATIS_CONFIG_ARCHIVE_DIRECTORY",
    "SATIS_CONFIG_ARCHIVE_FORMAT",
    SATIS_CONFIG_ARCHIVE_SKIP_DEV,
];

/// Values exactly as they arrive from the environment. The `config` crate
/// lowercases variable names, hence the field names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEnvironment {
    github_token: Option<String>,
    github_organization: Option<String>,
    github_repository_name: Option<String>,
    github_organization_homepage: Option<String>,
    github_api_url: Option<String>,
    satis_config_file: Option<String>,
    satis_config_require_all: Option<String>,
    satis_config_output_html: Option<String>,
    satis_config_archive_directory: Option<String>,
    satis_config_archive_format: Option<String>,
    satis_config_archive_skip_dev: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncConfig {
    pub organization: String,
    #[serde(serialize_with = "serialize_masked")]
    pub token: String,
    pub repository_name: String,
    pub homepage: String,
    pub api_url: String,
    pub output_path: PathBuf,
    pub require_all: bool,
    pub output_html: bool,
    pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveConfig {
    pub directory: String,
    pub format: String,
    pub skip_dev: bool,
}

impl SyncConfig {
    /// Loads `.env` (if any) and builds the configuration from the process
    /// environment. Variables already set win over the file.
    pub fn load(project_root: &Path, env_file: Option<&Path>) -> Result<Self> {
        load_env_file(project_root, env_file)?;
        Self::from_environment(project_root, process_environment()?)
    }

    /// Builds the configuration from `source`, a map of variable names to
    /// values. Names outside [`VARIABLES`] are ignored.
    pub fn from_environment(
        project_root: &Path,
        source: config::Map<String, String>,
    ) -> Result<Self> {
        let source: config::Map<String, String> = source
            .into_iter()
            .filter(|(name, _)| VARIABLES.contains(&name.as_str()))
            .collect();

        let settings = config::Config::builder()
            .add_source(config::Environment::default().source(Some(source)))
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        let raw: RawEnvironment = settings
            .try_deserialize()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        Self::from_raw(project_root, raw)
    }

    fn from_raw(project_root: &Path, raw: RawEnvironment) -> Result<Self> {
        let token = required(GITHUB_TOKEN, raw.github_token)?;
        let organization = required(GITHUB_ORGANIZATION, raw.github_organization)?;
        let repository_name = required(GITHUB_REPOSITORY_NAME, raw.github_repository_name)?;
        let homepage = required(GITHUB_ORGANIZATION_HOMEPAGE, raw.github_organization_homepage)?;
        let config_file = required(SATIS_CONFIG_FILE, raw.satis_config_file)?;

        Validator::validate_organization(&organization)?;
        Validator::validate_url(&homepage)?;

        let api_url = optional(raw.github_api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Validator::validate_url(&api_url)?;

        let config = Self {
            organization,
            token,
            repository_name,
            homepage,
            api_url,
            output_path: project_root.join(config_file),
            require_all: parse_flag(
                SATIS_CONFIG_REQUIRE_ALL,
                raw.satis_config_require_all.as_deref(),
                false,
            )?,
            output_html: parse_flag(
                SATIS_CONFIG_OUTPUT_HTML,
                raw.satis_config_output_html.as_deref(),
                false,
            )?,
            archive: ArchiveConfig {
                directory: optional(raw.satis_config_archive_directory)
                    .unwrap_or_else(|| DEFAULT_ARCHIVE_DIRECTORY.to_string()),
                format: optional(raw.satis_config_archive_format)
                    .unwrap_or_else(|| DEFAULT_ARCHIVE_FORMAT.to_string()),
                skip_dev: parse_flag(
                    SATIS_CONFIG_ARCHIVE_SKIP_DEV,
                    raw.satis_config_archive_skip_dev.as_deref(),
                    true,
                )?,
            },
        };

        debug!(
            "Loaded configuration for organization {} (output: {})",
            config.organization,
            config.output_path.display()
        );

        Ok(config)
    }

    /// The token with everything but its last four characters hidden.
    pub fn masked_token(&self) -> String {
        mask(&self.token)
    }
}

/// Interprets a string-encoded boolean. `true`/`1` are true, `false`/`0` and
/// the empty string are false, case-insensitively. An unset variable yields
/// `default`; any other value is rejected.
pub fn parse_flag(name: &'static str, value: Option<&str>, default: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(SyncError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}

/// Reads only [`VARIABLES`] from the process environment. A non-Unicode
/// value is an error for these names; unrelated variables are never touched.
fn process_environment() -> Result<config::Map<String, String>> {
    let mut source = config::Map::new();
    for name in VARIABLES {
        match std::env::var(name) {
            Ok(value) => {
                source.insert(name.to_string(), value);
            }
            Err(std::env::VarError::NotPresent) => {}
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(SyncError::Config(format!(
                    "{} contains non-Unicode data",
                    name
                )));
            }
        }
    }
    Ok(source)
}

fn required(name: &'static str, value: Option<String>) -> Result<String> {
    optional(value).ok_or(SyncError::MissingVariable(name))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn load_env_file(project_root: &Path, env_file: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = env_file {
        dotenvy::from_path(path).map_err(|e| {
            SyncError::Config(format!("Cannot load env file {}: {}", path.display(), e))
        })?;
        return Ok(Some(path.to_path_buf()));
    }

    let default_path = project_root.join(".env");
    if default_path.is_file() {
        dotenvy::from_path(&default_path).map_err(|e| {
            SyncError::Config(format!(
                "Cannot load env file {}: {}",
                default_path.display(),
                e
            ))
        })?;
        debug!("Loaded environment from {}", default_path.display());
        return Ok(Some(default_path));
    }

    Ok(None)
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

fn serialize_masked<S: Serializer>(secret: &str, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&mask(secret))
}
