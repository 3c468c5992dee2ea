//! Runtime abstraction for process-level operations.
//!
//! Configuration is resolved from the process environment; routing that
//! access through [`Runtime`] keeps resolution testable with a mock.

mod env;

use std::env as std_env;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    /// Read an environment variable.
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }
}
