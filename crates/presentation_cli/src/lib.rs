//! Play catalog CLI
//!
//! Command definitions for `catalog-cli`, a small client for a running
//! catalog service.

pub mod cli;

pub use cli::{Cli, Commands, RetryArgs};
