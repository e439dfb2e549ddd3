//! Calc CLI
//!
//! Library side of the `calc` binary: argument parsing, subcommands and
//! logging setup.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{build_cli, CliCommand, Invocation, LogFormat, SearchArgs};
pub use commands::{load_config, run, CommandOutput};
pub use logging::env_filter;
