// file: src/pipeline/orchestrator.rs
// description: fetches the organization listing, builds the manifest and writes it
// reference: linear fetch, transform, write workflow

use crate::config::SyncConfig;
use crate::error::Result;
use crate::exporter::ManifestWriter;
use crate::github::GithubClient;
use crate::models::Manifest;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub output_path: PathBuf,
    pub repositories: usize,
    pub duration: Duration,
}

pub struct SyncOperation<'a> {
    config: &'a SyncConfig,
    client: GithubClient,
    writer: ManifestWriter,
}

impl<'a> SyncOperation<'a> {
    pub fn new(config: &'a SyncConfig) -> Result<Self> {
        let client = GithubClient::new(config.api_url.as_str(), config.token.as_str())?;
        let writer = ManifestWriter::new(config.output_path.clone());

        Ok(Self {
            config,
            client,
            writer,
        })
    }

    /// Queries GitHub and builds the manifest without touching the disk.
    pub async fn build_manifest(&self) -> Result<Manifest> {
        info!(
            "Fetching repositories of organization {}",
            self.config.organization
        );

        let repositories = self
            .client
            .list_org_repositories(&self.config.organization)
            .await?;

        if repositories.is_empty() {
            warn!(
                "Organization {} returned no repositories; the manifest will list none",
                self.config.organization
            );
        } else {
            info!("Found {} repositories", repositories.len());
        }

        Ok(Manifest::build(self.config, &repositories))
    }

    /// Runs the whole sync. Nothing is written unless the listing was
    /// fetched and decoded.
    pub async fn run(&self) -> Result<SyncReport> {
        let start_time = Instant::now();

        let manifest = self.build_manifest().await?;
        self.writer.write(&manifest)?;

        let duration = start_time.elapsed();
        info!("Sync complete in {:.2}s", duration.as_secs_f64());

        Ok(SyncReport {
            output_path: self.writer.path().to_path_buf(),
            repositories: manifest.repositories.len(),
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchiveConfig;
    use crate::error::SyncError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const TWO_REPOS: &str = r#"[
        {"clone_url": "https://github.com/org/a.git"},
        {"clone_url": "https://github.com/org/b.git"}
    ]"#;

    fn test_config(api_url: &str, output_path: &Path) -> SyncConfig {
        SyncConfig {
            organization: "org".to_string(),
            token: "T".to_string(),
            repository_name: "org/satis".to_string(),
            homepage: "https://satis.org.test".to_string(),
            api_url: api_url.to_string(),
            output_path: output_path.to_path_buf(),
            require_all: false,
            output_html: false,
            archive: ArchiveConfig {
                directory: "dist".to_string(),
                format: "zip".to_string(),
                skip_dev: true,
            },
        }
    }

    #[tokio::test]
    async fn test_run_writes_manifest() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/org/repos")
            .match_header("authorization", "Bearer T")
            .with_status(200)
            .with_body(TWO_REPOS)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("satis.json");
        let config = test_config(&server.url(), &path);

        let report = SyncOperation::new(&config).unwrap().run().await.unwrap();

        assert_eq!(report.repositories, 2);
        assert_eq!(report.output_path, path);
        mock.assert_async().await;

        let written: Manifest =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let urls: Vec<&str> = written.repositories.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://github.com/org/a.git", "https://github.com/org/b.git"]
        );
        assert!(
            written
                .repositories
                .iter()
                .all(|r| r.options.http.header == vec!["API-TOKEN: T".to_string()])
        );
    }

    #[tokio::test]
    async fn test_two_runs_produce_identical_files() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/orgs/org/repos")
            .with_status(200)
            .with_body(TWO_REPOS)
            .expect(2)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("satis.json");
        let config = test_config(&server.url(), &path);
        let operation = SyncOperation::new(&config).unwrap();

        operation.run().await.unwrap();
        let first = fs::read(&path).unwrap();
        operation.run().await.unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unauthorized_leaves_existing_file_untouched() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/orgs/org/repos")
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("satis.json");
        fs::write(&path, "previous content").unwrap();
        let config = test_config(&server.url(), &path);

        let err = SyncOperation::new(&config).unwrap().run().await.unwrap_err();

        assert!(matches!(err, SyncError::ApiStatus { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous content");
    }

    #[tokio::test]
    async fn test_malformed_body_writes_nothing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/orgs/org/repos")
            .with_status(200)
            .with_body("<html>rate limited</html>")
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("satis.json");
        let config = test_config(&server.url(), &path);

        let err = SyncOperation::new(&config).unwrap().run().await.unwrap_err();

        assert!(matches!(err, SyncError::ResponseFormat { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unwritable_output_fails_after_api_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/org/repos")
            .with_status(200)
            .with_body(TWO_REPOS)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let config = test_config(&server.url(), &blocker.join("satis.json"));

        let err = SyncOperation::new(&config).unwrap().run().await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, SyncError::Write { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_build_manifest_does_not_write() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/orgs/org/repos")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("satis.json");
        let config = test_config(&server.url(), &path);

        let manifest = SyncOperation::new(&config)
            .unwrap()
            .build_manifest()
            .await
            .unwrap();

        assert!(manifest.repositories.is_empty());
        assert!(!path.exists());
    }
}
