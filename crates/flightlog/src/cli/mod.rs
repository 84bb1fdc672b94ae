//! Command-line interface for flightlog.
//!
//! This module provides the CLI structure for the `flog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddServiceArgs, ConfigCommand, DashboardCommand, DurationCommand, FlightsCommand,
    ImportCommand, ServicesCommand,
};

/// flog - a pilot's flight logbook
///
/// Keeps trips, duty periods and service entries in a local database and
/// rolls them up into logbook totals.
#[derive(Debug, Parser)]
#[command(name = "flog")]
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
    /// Manage flight records
    #[command(subcommand)]
    Flights(FlightsCommand),

    /// Manage the service log
    #[command(subcommand)]
    Services(ServicesCommand),

    /// Show logbook totals and recent activity
    Dashboard(DashboardCommand),

    /// Compute the elapsed time between two clock times
    Duration(DurationCommand),

    /// Replace the logbook with an exported local-storage dump
    Import(ImportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "flog");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        use crate::logging::Verbosity;

        assert_eq!(parse(&["flog", "-q", "dashboard"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["flog", "dashboard"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["flog", "-v", "dashboard"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["flog", "-vv", "dashboard"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_flights_delete() {
        let cli = parse(&["flog", "flights", "delete", "abc", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Flights(FlightsCommand::Delete { ref id, yes: true }) if id == "abc"
        ));
    }

    #[test]
    fn test_parse_flights_save() {
        let cli = parse(&["flog", "flights", "save", "trip.json"]);
        assert!(matches!(
            cli.command,
            Command::Flights(FlightsCommand::Save { ref file }) if file == &PathBuf::from("trip.json")
        ));
    }

    #[test]
    fn test_parse_services_add() {
        let cli = parse(&[
            "flog", "services", "add", "--date", "2024-05-01", "--station", "OMDB", "--type",
            "Fuel", "--cost", "1200.50",
        ]);
        let Command::Services(ServicesCommand::Add(args)) = cli.command else {
            panic!("expected services add");
        };
        assert_eq!(args.station, "OMDB");
        assert_eq!(args.service_type, "Fuel");
        assert_eq!(args.cost, "1200.50");
        assert_eq!(args.quantity, "0");
    }

    #[test]
    fn test_parse_duration() {
        let cli = parse(&["flog", "duration", "23:00", "01:00"]);
        let Command::Duration(cmd) = cli.command else {
            panic!("expected duration");
        };
        assert_eq!(cmd.start, "23:00");
        assert_eq!(cmd.end, "01:00");
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["flog", "-c", "/custom/config.toml", "dashboard"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_services_add_requires_station() {
        assert!(Cli::try_parse_from(["flog", "services", "add", "--date", "2024-05-01"]).is_err());
    }
}
