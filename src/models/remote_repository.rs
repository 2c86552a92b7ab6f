// file: src/models/remote_repository.rs
// description: repository record as returned by the GitHub organization listing
// reference: https://docs.github.com/en/rest/repos/repos#list-organization-repositories

use serde::Deserialize;

/// One element of `GET /orgs/{org}/repos`. Only the fields the manifest
/// needs are decoded; everything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRepository {
    pub clone_url: String,
}

impl RemoteRepository {
    pub fn new(clone_url: impl Into<String>) -> Self {
        Self {
            clone_url: clone_url.into(),
        }
    }
}
