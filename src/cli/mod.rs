//! CLI module - argument parsing and subcommands

pub mod args;
pub mod inspect;

pub use args::{Cli, Commands};
