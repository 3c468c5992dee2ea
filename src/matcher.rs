//! Name, version and tag matchers compiled once per run.

use anyhow::{Context, Result, bail};
use regex::Regex;

/// The compiled selection rules for one prune run.
#[derive(Debug, Clone)]
pub struct Matchers {
    pub name: Regex,
    pub version: Regex,
    /// `None` disables tag filtering.
    pub tag: Option<Regex>,
    /// Select only versions without tags; takes precedence over `tag`.
    pub untagged: bool,
}

impl Matchers {
    pub fn compile(
        name_pattern: &str,
        version_pattern: &str,
        tag_pattern: Option<&str>,
        untagged: bool,
    ) -> Result<Self> {
        if name_pattern.is_empty() {
            bail!("No package name pattern specified. Please configure the 'name' input");
        }
        if version_pattern.is_empty() {
            bail!("No package version pattern specified. Please configure the 'version' input");
        }

        let name = Regex::new(name_pattern)
            .with_context(|| format!("Invalid package name pattern '{}'", name_pattern))?;
        let version = Regex::new(version_pattern)
            .with_context(|| format!("Invalid package version pattern '{}'", version_pattern))?;
        let tag = tag_pattern
            .filter(|p| !p.is_empty())
            .map(|p| Regex::new(p).with_context(|| format!("Invalid tag pattern '{}'", p)))
            .transpose()?;

        Ok(Self {
            name,
            version,
            tag,
            untagged,
        })
    }
}
