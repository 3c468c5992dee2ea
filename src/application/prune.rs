//! Prune action - orchestrates one cleanup run.
//!
//! This action coordinates:
//! - Listing the organization's packages and keeping those of the repository
//! - Listing each matched package's versions and keeping the selected ones
//! - Deleting the selected versions and reporting the aggregate outcome

use anyhow::{Result, bail};
use log::{debug, info, warn};

use crate::config::{Inputs, Settings};
use crate::deletion::{DeletionExecutor, DeletionReport};
use crate::filter::{MatchedPackage, MatchedVersion, filter_packages, filter_versions};
use crate::http::HttpClient;
use crate::matcher::Matchers;
use crate::pagination::paginate;
use crate::registry::{GitHubPackages, PackageRegistry};
use crate::runtime::Runtime;

/// Prune action - finds and deletes matching package versions
pub struct PruneAction<'a, P: PackageRegistry> {
    registry: &'a P,
    settings: &'a Settings,
    matchers: Matchers,
}

impl<'a, P: PackageRegistry> PruneAction<'a, P> {
    pub fn new(registry: &'a P, settings: &'a Settings, matchers: Matchers) -> Self {
        Self {
            registry,
            settings,
            matchers,
        }
    }

    fn org(&self) -> &str {
        &self.settings.repository.owner
    }

    fn repo(&self) -> &str {
        &self.settings.repository.repo
    }

    /// Packages of the organization that belong to the repository and match
    /// the name pattern.
    pub async fn find_packages(&self) -> Result<Vec<MatchedPackage>> {
        let package_type = self.settings.package_type.as_str();
        paginate(
            |page| self.registry.list_packages_page(self.org(), package_type, page),
            |records| filter_packages(records, self.repo(), &self.matchers.name),
        )
        .await
    }

    /// Selected versions of all `packages`, package by package.
    pub async fn find_versions(&self, packages: &[MatchedPackage]) -> Result<Vec<MatchedVersion>> {
        let package_type = self.settings.package_type.as_str();
        let mut versions = Vec::new();
        for package in packages {
            let name = package.name.as_str();
            let matched = paginate(
                |page| {
                    self.registry
                        .list_versions_page(self.org(), package_type, name, page)
                },
                |records| filter_versions(records, name, &self.matchers),
            )
            .await?;
            debug!("{} versions of {} selected", matched.len(), name);
            versions.extend(matched);
        }
        Ok(versions)
    }

    /// Run the whole prune; fails if any selected version could not be
    /// removed.
    pub async fn run(&self) -> Result<DeletionReport> {
        let s = self.settings;
        info!(
            "Searching for packages in {} owned by {} that match the name-pattern: '{}' and version-pattern: '{}' with package-type: '{}'",
            self.repo(),
            self.org(),
            s.name_pattern,
            s.version_pattern,
            s.package_type
        );

        let packages = self.find_packages().await?;
        for (i, package) in packages.iter().enumerate() {
            debug!("Matched Package: {} {:?}", i, package);
        }
        info!(
            "Found {} packages that match '{}' in repo {}",
            packages.len(),
            s.name_pattern,
            self.repo()
        );

        let versions = self.find_versions(&packages).await?;
        for version in &versions {
            debug!("Matched version {:?}", version);
        }
        info!(
            "Found {} versions that match '{}' in repo {} for {} matched packages",
            versions.len(),
            s.version_pattern,
            self.repo(),
            packages.len()
        );

        let executor = DeletionExecutor::new(self.registry, self.org(), &s.package_type);
        let report = executor.run(versions).await;
        info!(
            "Deleted {} versions and {} packages; {} failures",
            report.deleted_versions(),
            report.deleted_packages(),
            report.failures()
        );

        if report.encountered_error() {
            bail!("An error occurred while deleting versions. Please check the log for details.");
        }
        Ok(report)
    }
}

/// Resolve configuration, connect to the registry and prune.
pub async fn run_prune<R: Runtime>(runtime: R, inputs: Inputs) -> Result<()> {
    let settings = Settings::resolve(&inputs, &runtime)?;
    let matchers = settings.matchers()?;
    if matchers.untagged && matchers.tag.is_some() {
        warn!("Both untagged and a tag pattern are configured; the tag pattern is ignored");
    }

    let http_client = HttpClient::with_token(&settings.token)?;
    let registry = GitHubPackages::new(http_client, settings.api_url.clone());

    PruneAction::new(&registry, &settings, matchers).run().await?;
    Ok(())
}
