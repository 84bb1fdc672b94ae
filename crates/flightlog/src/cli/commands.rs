//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Flight record commands.
#[derive(Debug, Subcommand)]
pub enum FlightsCommand {
    /// List flight records
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one flight record in full
    Show {
        /// Record id
        id: String,
    },

    /// Print a blank new-trip record to fill in
    Draft,

    /// Recompute totals and save a record from a JSON file
    ///
    /// A record whose id matches an existing one replaces it.
    Save {
        /// JSON file holding one flight record
        file: PathBuf,
    },

    /// Delete a flight record
    Delete {
        /// Record id
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Service log commands.
#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List service records
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Append a service record
    Add(AddServiceArgs),
}

/// Fields of a new service record.
///
/// Numeric fields that fail to parse are stored as zero.
#[derive(Debug, Args)]
pub struct AddServiceArgs {
    /// Service date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Station
    #[arg(long)]
    pub station: String,

    /// Invoice number
    #[arg(long, default_value = "")]
    pub invoice: String,

    /// Kind of service
    #[arg(long = "type", default_value = "")]
    pub service_type: String,

    /// Quantity
    #[arg(long, default_value = "0")]
    pub quantity: String,

    /// Cost
    #[arg(long, default_value = "0")]
    pub cost: String,

    /// Free-text details
    #[arg(long, default_value = "")]
    pub details: String,
}

/// Dashboard command arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Duration command arguments.
#[derive(Debug, Args)]
pub struct DurationCommand {
    /// Start time (HH:MM)
    pub start: String,

    /// End time (HH:MM); earlier than start means the next day
    pub end: String,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// JSON file with `flightLogbook_flights` and `flightLogbook_services` keys
    pub file: PathBuf,

    /// Replace existing records without asking
    #[arg(short, long)]
    pub yes: bool,
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
