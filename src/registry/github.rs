//! GitHub Packages implementation of [`PackageRegistry`].

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::Url;

use crate::http::HttpClient;
use crate::pagination::Page;

use super::{PackageRecord, PackageRegistry, VersionRecord};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: &str = "100";

/// Organization packages on GitHub Packages.
pub struct GitHubPackages {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubPackages {
    pub fn new(http_client: HttpClient, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            http_client,
            api_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Join path segments onto the API URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid API URL '{}'", self.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid API URL '{}'", self.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }
}

#[async_trait]
impl PackageRegistry for GitHubPackages {
    #[tracing::instrument(skip(self))]
    async fn list_packages_page(
        &self,
        org: &str,
        package_type: &str,
        page: u32,
    ) -> Result<Page<PackageRecord>> {
        let url = self.endpoint(&["orgs", org, "packages"])?;
        debug!("Listing {} packages of {} (page {})...", package_type, org, page);

        let page = page.to_string();
        self.http_client
            .get_page(
                &url,
                &[
                    ("package_type", package_type),
                    ("per_page", PER_PAGE),
                    ("page", page.as_str()),
                ],
            )
            .await
            .with_context(|| format!("Failed to list {} packages of {}", package_type, org))
    }

    #[tracing::instrument(skip(self))]
    async fn list_versions_page(
        &self,
        org: &str,
        package_type: &str,
        package_name: &str,
        page: u32,
    ) -> Result<Page<VersionRecord>> {
        let url = self.endpoint(&[
            "orgs",
            org,
            "packages",
            package_type,
            package_name,
            "versions",
        ])?;
        debug!("Listing versions of {} (page {})...", package_name, page);

        let page = page.to_string();
        self.http_client
            .get_page(&url, &[("per_page", PER_PAGE), ("page", page.as_str())])
            .await
            .with_context(|| format!("Failed to list versions of package {}", package_name))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_version(
        &self,
        org: &str,
        package_type: &str,
        package_name: &str,
        version_id: u64,
    ) -> Result<()> {
        let id = version_id.to_string();
        let url = self.endpoint(&[
            "orgs",
            org,
            "packages",
            package_type,
            package_name,
            "versions",
            &id,
        ])?;
        self.http_client.delete(&url).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_package(
        &self,
        org: &str,
        package_type: &str,
        package_name: &str,
    ) -> Result<()> {
        let url = self.endpoint(&["orgs", org, "packages", package_type, package_name])?;
        self.http_client.delete(&url).await
    }
}
