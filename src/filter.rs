//! Per-page filters that narrow registry listings down to prune candidates.
//!
//! Both filters are pure: they take one page of records and return the
//! surviving entries in the order the registry listed them.

use regex::Regex;

use crate::matcher::Matchers;
use crate::registry::{PackageRecord, VersionRecord};

/// A package selected for version lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPackage {
    pub name: String,
    pub version_count: u64,
}

/// A package version selected for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedVersion {
    pub package_name: String,
    pub version_label: String,
    pub id: u64,
    pub tags: Vec<String>,
}

impl MatchedVersion {
    /// Tags joined with commas; empty for untagged versions.
    pub fn joined_tags(&self) -> String {
        self.tags.join(",")
    }
}

/// Keep packages published from `repo` whose name matches `name`.
///
/// Packages without a repository association never match, so same-named
/// packages of other repositories in an organization-wide listing are left
/// alone.
pub fn filter_packages(
    records: Vec<PackageRecord>,
    repo: &str,
    name: &Regex,
) -> Vec<MatchedPackage> {
    records
        .into_iter()
        .filter(|r| r.repository.as_ref().is_some_and(|rr| rr.name == repo))
        .filter(|r| name.is_match(&r.name))
        .map(|r| MatchedPackage {
            name: r.name,
            version_count: r.version_count,
        })
        .collect()
}

/// Keep versions of `package_name` selected by the version and tag rules.
pub fn filter_versions(
    records: Vec<VersionRecord>,
    package_name: &str,
    matchers: &Matchers,
) -> Vec<MatchedVersion> {
    records
        .into_iter()
        .filter(|r| matchers.version.is_match(&r.name))
        .filter(|r| tags_selected(&r.tags().join(","), matchers))
        .map(|r| MatchedVersion {
            package_name: package_name.to_string(),
            tags: r.tags().to_vec(),
            version_label: r.name,
            id: r.id,
        })
        .collect()
}

fn tags_selected(joined_tags: &str, matchers: &Matchers) -> bool {
    if matchers.untagged {
        return joined_tags.is_empty();
    }
    match &matchers.tag {
        Some(tag) => tag.is_match(joined_tags),
        None => true,
    }
}
