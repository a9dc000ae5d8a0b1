//! CLI module for the Teams API
//!
//! Subcommands:
//! - `serve`: initialize storage and run the HTTP server (default)
//! - `init-storage`: only create the storage schema

pub mod serve;
pub mod storage;

use clap::{Parser, Subcommand};

/// Teams API - REST service for teams, users and team membership
#[derive(Debug, Parser)]
#[command(name = "teams-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Initialize storage and run the HTTP server (default)
    Serve,

    /// Create the storage schema and exit; safe to run repeatedly
    InitStorage,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
