//! Non-interactive subcommands

pub mod config;
pub mod theme;
pub mod validate;
