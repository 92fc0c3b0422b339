//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::donation::DonationType;
use crate::views::TypeFilter;

/// Add command arguments.
///
/// Fields are passed through the donation form as raw text and validated
/// there.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Donor's name
    #[arg(short, long)]
    pub donor: String,

    /// Type of donation (money, food, clothing, toys, other)
    #[arg(short = 't', long = "type")]
    pub donation_type: String,

    /// Quantity, or amount in dollars for money
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    pub value: String,

    /// Date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

/// Edit command arguments.
///
/// Fields left out keep their current value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the donation to edit
    pub id: String,

    /// New donor's name
    #[arg(short, long)]
    pub donor: Option<String>,

    /// New type of donation
    #[arg(short = 't', long = "type")]
    pub donation_type: Option<String>,

    /// New quantity or amount
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    pub value: Option<String>,

    /// New date as YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
}

/// Remove command arguments.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Id of the donation to delete
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Show only this type ("all" for every type)
    #[arg(short = 't', long = "type")]
    pub filter: Option<TypeFilter>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Type to summarise (defaults to the configured summary type)
    #[arg(short = 't', long = "type")]
    pub donation_type: Option<DonationType>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Statistics command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One donation per line
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            donor: "Jane Doe".to_string(),
            donation_type: "money".to_string(),
            value: "50".to_string(),
            date: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Jane Doe"));
        assert!(debug_str.contains("donation_type"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
