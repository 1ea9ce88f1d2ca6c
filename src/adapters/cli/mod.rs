//! CLI Adapter
//!
//! Command-line interface for token-scout.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    execute, resolve_config, CliApp, Command, DiscoverCmd, PoolsCmd, DEFAULT_CONFIG_PATH,
};

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
