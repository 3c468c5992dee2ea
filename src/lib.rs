pub mod application;
pub mod config;
pub mod deletion;
pub mod filter;
pub mod http;
pub mod logging;
pub mod matcher;
pub mod pagination;
pub mod registry;
pub mod runtime;
