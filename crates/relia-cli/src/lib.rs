//! Relia CLI library.
//!
//! This library provides the core functionality for the `relia` command-line
//! interface: argument parsing, configuration management, system file
//! loading, command execution and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod system;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
