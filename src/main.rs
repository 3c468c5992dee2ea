use anyhow::Result;
use clap::Parser;
use ghpkg_prune::application::run_prune;
use ghpkg_prune::config::Inputs;
use ghpkg_prune::runtime::RealRuntime;

/// ghpkg-prune - delete GitHub Packages versions by name, version and tag
///
/// Removes the versions of a repository's packages whose name, version label
/// and tags match the given patterns. When a matched version is the last one
/// of its package, the whole package is deleted instead.
///
/// Every option can also be supplied as a GitHub Actions input (INPUT_NAME,
/// INPUT_VERSION, ...) or through its legacy environment variable.
///
/// Examples:
///   ghpkg-prune --repository acme/app --package-type maven \
///       --name-pattern '^lib-' --version-pattern 'SNAPSHOT$'
///   ghpkg-prune --repository acme/app --package-type container \
///       --name-pattern '^app$' --version-pattern '.*' --untagged
#[derive(Parser, Debug)]
#[command(author, version = env!("GHPKG_PRUNE_VERSION"), about)]
struct Cli {
    #[command(flatten)]
    inputs: Inputs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let runtime = RealRuntime;
    ghpkg_prune::logging::init(&runtime);
    let cli = Cli::parse();

    run_prune(runtime, cli.inputs).await
}
