//! Command-line interface

pub mod commands;

pub use commands::{cmd_deposit, cmd_derive, cmd_inspect, cmd_paths, CliResult};
