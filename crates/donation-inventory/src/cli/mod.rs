//! Command-line interface for donation-inventory.
//!
//! This module provides the CLI structure and output rendering for the
//! `dinv` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, EditCommand, ListCommand, OutputFormat, RemoveCommand,
    StatsCommand, SummaryCommand,
};

/// dinv - Keep track of donations
///
/// Record money, food, clothing, toy and other donations, then filter and
/// summarise them. Everything is stored locally.
#[derive(Debug, Parser)]
#[command(name = "dinv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new donation
    Add(AddCommand),

    /// Change an existing donation
    Edit(EditCommand),

    /// Delete a donation
    Remove(RemoveCommand),

    /// List donations
    List(ListCommand),

    /// Count and total for one donation type
    Summary(SummaryCommand),

    /// Totals across all donations
    Stats(StatsCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}
