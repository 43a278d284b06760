//! # Toolhub CLI
//!
//! Argument parsing, logging setup and the subcommands behind the
//! `toolhub` binary.

pub mod cli;
pub mod commands;
pub mod logging;
