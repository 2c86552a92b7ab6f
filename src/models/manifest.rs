// file: src/models/manifest.rs
// description: satis.json manifest model and its construction from the organization listing
// reference: https://composer.github.io/satis/config

use crate::config::SyncConfig;
use crate::models::RemoteRepository;
use serde::{Deserialize, Serialize};

pub const VCS_TYPE: &str = "vcs";

/// The whole `satis.json` document. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    pub name: String,
    pub homepage: String,
    pub repositories: Vec<RepositoryEntry>,
    pub require_all: bool,
    pub output_html: bool,
    pub archive: ArchiveOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub options: RepositoryOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryOptions {
    pub http: HttpOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpOptions {
    pub header: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArchiveOptions {
    pub directory: String,
    pub format: String,
    pub skip_dev: bool,
}

impl RepositoryEntry {
    /// A VCS entry whose fetches authenticate with `API-TOKEN: {token}`.
    pub fn vcs(url: impl Into<String>, token: &str) -> Self {
        Self {
            kind: VCS_TYPE.to_string(),
            url: url.into(),
            options: RepositoryOptions {
                http: HttpOptions {
                    header: vec![format!("API-TOKEN: {}", token)],
                },
            },
        }
    }
}

impl Manifest {
    /// One entry per remote repository, in listing order.
    pub fn build(config: &SyncConfig, repositories: &[RemoteRepository]) -> Self {
        Self {
            name: config.repository_name.clone(),
            homepage: config.homepage.clone(),
            repositories: repositories
                .iter()
                .map(|repo| RepositoryEntry::vcs(repo.clone_url.as_str(), &config.token))
                .collect(),
            require_all: config.require_all,
            output_html: config.output_html,
            archive: ArchiveOptions {
                directory: config.archive.directory.clone(),
                format: config.archive.format.clone(),
                skip_dev: config.archive.skip_dev,
            },
        }
    }
}
