//! Logger setup.
//!
//! Inside GitHub Actions, log lines go to stdout and errors, warnings and
//! debug lines are written as workflow commands so the runner turns them
//! into annotations.

use env_logger::{Builder, Env, Target};
use log::{Level, debug};
use std::io::Write;

use crate::runtime::Runtime;

/// Initialise the global logger. `RUST_LOG` overrides the default filter.
pub fn init<R: Runtime>(runtime: &R) {
    let is_set = |key: &str, value: &str| runtime.env_var(key).is_ok_and(|v| v == value);

    let default_filter = if is_set("RUNNER_DEBUG", "1") {
        "info,ghpkg_prune=debug"
    } else {
        "info"
    };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    if is_set("GITHUB_ACTIONS", "true") {
        // The runner reads workflow commands from stdout.
        builder.target(Target::Stdout);
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{}",
                workflow_line(record.level(), &record.args().to_string())
            )
        });
    }

    if builder.try_init().is_err() {
        debug!("Logger already initialised; keeping the existing one");
    }
}

/// Render a log line as a GitHub Actions workflow command.
pub fn workflow_line(level: Level, message: &str) -> String {
    match level {
        Level::Error => format!("::error::{}", escape_data(message)),
        Level::Warn => format!("::warning::{}", escape_data(message)),
        Level::Debug | Level::Trace => format!("::debug::{}", escape_data(message)),
        Level::Info => message.to_string(),
    }
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
