//! Package registry abstraction.
//!
//! The prune workflow only needs four registry operations: page through an
//! organization's packages, page through one package's versions, delete a
//! version, and delete a whole package.

mod github;
mod types;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::pagination::Page;

pub use github::{DEFAULT_API_URL, GitHubPackages};
pub use types::{ContainerMetadata, PackageRecord, RepositoryRef, VersionMetadata, VersionRecord};

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format '{}'. Expected 'owner/repo'.", s)
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// Registry operations used by the prune workflow.
///
/// Packages are always addressed within an organization (`org`) and a
/// package type such as `container`, `maven` or `npm`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Fetch one page of the organization's packages of `package_type`.
    async fn list_packages_page(
        &self,
        org: &str,
        package_type: &str,
        page: u32,
    ) -> Result<Page<PackageRecord>>;

    /// Fetch one page of a package's versions.
    async fn list_versions_page(
        &self,
        org: &str,
        package_type: &str,
        package_name: &str,
        page: u32,
    ) -> Result<Page<VersionRecord>>;

    /// Delete one version. The error's message is the registry's own text.
    async fn delete_version(
        &self,
        org: &str,
        package_type: &str,
        package_name: &str,
        version_id: u64,
    ) -> Result<()>;

    /// Delete a package together with all of its versions.
    async fn delete_package(&self, org: &str, package_type: &str, package_name: &str)
    -> Result<()>;
}
