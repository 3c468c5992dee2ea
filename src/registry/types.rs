use serde::Deserialize;

/// Repository a package was published from.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RepositoryRef {
    pub name: String,
}

/// One entry of the organization package listing.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PackageRecord {
    pub name: String,
    #[serde(default)]
    pub version_count: u64,
    #[serde(default)]
    pub repository: Option<RepositoryRef>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ContainerMetadata {
    /// The registry may send `null` here for untagged images.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct VersionMetadata {
    #[serde(default)]
    pub container: Option<ContainerMetadata>,
}

/// One entry of a package's version listing.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct VersionRecord {
    pub id: u64,
    /// Version label (a semver string, or a digest for container images).
    pub name: String,
    #[serde(default)]
    pub metadata: Option<VersionMetadata>,
}

impl VersionRecord {
    /// Container tags, empty when the registry reports none.
    pub fn tags(&self) -> &[String] {
        self.metadata
            .as_ref()
            .and_then(|m| m.container.as_ref())
            .and_then(|c| c.tags.as_deref())
            .unwrap_or(&[])
    }
}
