//! Run configuration.
//!
//! Each option is taken from the command line first, then from the GitHub
//! Actions input variable (`INPUT_<NAME>`), then from a fixed legacy
//! environment variable. Empty values count as unset.

use anyhow::{Result, bail};
use log::debug;

use crate::matcher::Matchers;
use crate::registry::RepoId;
use crate::runtime::Runtime;

/// Options given explicitly on the command line.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct Inputs {
    /// Regular expression selecting package names (also INPUT_NAME, PKG_NAME_PATTERN)
    #[arg(long, value_name = "REGEX")]
    pub name_pattern: Option<String>,

    /// Regular expression selecting version labels (also INPUT_VERSION, PKG_VERSION_PATTERN)
    #[arg(long, value_name = "REGEX")]
    pub version_pattern: Option<String>,

    /// Package type, e.g. container, maven, npm (also INPUT_TYPE, PKG_TYPE)
    #[arg(long, value_name = "TYPE")]
    pub package_type: Option<String>,

    /// API token (also INPUT_TOKEN, GITHUB_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Regular expression matched against the comma-joined tags (also INPUT_TAG, TAG)
    #[arg(long, value_name = "REGEX")]
    pub tag_pattern: Option<String>,

    /// Select only versions without tags; overrides --tag-pattern (also INPUT_UNTAGGED, UNTAGGED)
    #[arg(long)]
    pub untagged: bool,

    /// Repository whose packages are pruned (also GITHUB_REPOSITORY)
    #[arg(long, value_name = "OWNER/REPO")]
    pub repository: Option<String>,

    /// API URL (also GITHUB_API_URL; defaults to https://api.github.com)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Fully resolved configuration for one run.
#[derive(Clone)]
pub struct Settings {
    pub name_pattern: String,
    pub version_pattern: String,
    pub package_type: String,
    pub token: String,
    pub tag_pattern: Option<String>,
    pub untagged: bool,
    pub repository: RepoId,
    pub api_url: Option<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("name_pattern", &self.name_pattern)
            .field("version_pattern", &self.version_pattern)
            .field("package_type", &self.package_type)
            .field("token", &"***")
            .field("tag_pattern", &self.tag_pattern)
            .field("untagged", &self.untagged)
            .field("repository", &self.repository)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Settings {
    pub fn resolve<R: Runtime>(inputs: &Inputs, runtime: &R) -> Result<Self> {
        let env = Env { runtime };

        let version_pattern = env.lookup(
            inputs.version_pattern.as_deref(),
            "version",
            "PKG_VERSION_PATTERN",
        );
        let name_pattern =
            env.lookup(inputs.name_pattern.as_deref(), "name", "PKG_NAME_PATTERN");
        let package_type = env.lookup(inputs.package_type.as_deref(), "type", "PKG_TYPE");
        let token = env.lookup(inputs.token.as_deref(), "token", "GITHUB_TOKEN");
        let tag_pattern = env.lookup(inputs.tag_pattern.as_deref(), "tag", "TAG");
        let untagged = env.untagged(inputs.untagged)?;

        let Some(version_pattern) = version_pattern else {
            bail!("No package version pattern specified. Please configure the 'version' input");
        };
        let Some(name_pattern) = name_pattern else {
            bail!("No package name pattern specified. Please configure the 'name' input");
        };
        let Some(package_type) = package_type else {
            bail!("No package type specified. Please configure the 'type' input");
        };
        let Some(token) = token else {
            bail!("No token specified. Please configure the 'token' input or set GITHUB_TOKEN");
        };

        let Some(repository) = non_empty(inputs.repository.as_deref())
            .or_else(|| env.var("GITHUB_REPOSITORY"))
        else {
            bail!("No repository specified. Please pass --repository or set GITHUB_REPOSITORY");
        };
        let repository = repository.parse::<RepoId>()?;

        let api_url = non_empty(inputs.api_url.as_deref()).or_else(|| env.var("GITHUB_API_URL"));

        let settings = Self {
            name_pattern,
            version_pattern,
            package_type,
            token,
            tag_pattern,
            untagged,
            repository,
            api_url,
        };
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    pub fn matchers(&self) -> Result<Matchers> {
        Matchers::compile(
            &self.name_pattern,
            &self.version_pattern,
            self.tag_pattern.as_deref(),
            self.untagged,
        )
    }
}

struct Env<'a, R: Runtime> {
    runtime: &'a R,
}

impl<R: Runtime> Env<'_, R> {
    fn var(&self, key: &str) -> Option<String> {
        self.runtime.env_var(key).ok().filter(|v| !v.is_empty())
    }

    /// The value of Actions input `name`, as exported by the runner.
    fn input(&self, name: &str) -> Option<String> {
        self.var(&format!("INPUT_{}", name.to_uppercase()))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn lookup(&self, explicit: Option<&str>, input: &str, fallback: &str) -> Option<String> {
        non_empty(explicit)
            .or_else(|| self.input(input))
            .or_else(|| self.var(fallback))
    }

    /// A false input still lets the legacy `UNTAGGED=true` switch the mode on.
    fn untagged(&self, explicit: bool) -> Result<bool> {
        if explicit {
            return Ok(true);
        }
        if let Some(value) = self.input("untagged") {
            if parse_input_bool("untagged", &value)? {
                return Ok(true);
            }
        }
        Ok(self.var("UNTAGGED").as_deref() == Some("true"))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Boolean inputs accept the YAML 1.2 core schema spellings only.
fn parse_input_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        _ => bail!(
            "Input does not meet YAML 1.2 \"Core Schema\" specification: {}. Support boolean input list: `true | True | TRUE | false | False | FALSE`",
            name
        ),
    }
}
