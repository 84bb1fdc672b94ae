//! `flog` - CLI for flightlog
//!
//! This binary provides the command-line interface for keeping the logbook:
//! saving and listing trips, the service log, and the dashboard roll-up.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use serde::de::DeserializeOwned;
use serde_json::Value;

use flightlog::cli::{
    AddServiceArgs, Cli, Command, ConfigCommand, FlightsCommand, ImportCommand, ServicesCommand,
};
use flightlog::store::{FLIGHTS_KEY, SERVICES_KEY};
use flightlog::time::{display_duration, display_time};
use flightlog::{
    compute_dashboard_stats, init_logging, recent_activity, ClockTime, Config, Error,
    FlightRecord, RecordStore, ServiceRecord, SqliteStore,
};

type Store = RecordStore<SqliteStore>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    // Execute the command
    match cli.command {
        Command::Flights(cmd) => with_store(&config, |store| handle_flights(store, &config, cmd)),
        Command::Services(cmd) => with_store(&config, |store| handle_services(store, cmd)),
        Command::Dashboard(cmd) => {
            with_store(&config, |store| handle_dashboard(store, &config, cmd.json))
        }
        Command::Duration(cmd) => handle_duration(&cmd.start, &cmd.end),
        Command::Import(cmd) => with_store(&config, |store| handle_import(store, &cmd)),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Open the logbook, run `f` against it, then flush and close.
fn with_store(
    config: &Config,
    f: impl FnOnce(&mut Store) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let db_path = config.database_path();
    let backend = SqliteStore::open(&db_path)
        .with_context(|| format!("opening logbook at {}", db_path.display()))?;
    let mut store = RecordStore::open(backend)?;
    f(&mut store)?;
    store.close()?;
    Ok(())
}

fn handle_flights(store: &mut Store, config: &Config, cmd: FlightsCommand) -> anyhow::Result<()> {
    match cmd {
        FlightsCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.list_flights())?);
            } else if store.list_flights().is_empty() {
                println!("No flights logged.");
            } else {
                for flight in store.list_flights() {
                    print_flight_line(flight);
                }
            }
        }
        FlightsCommand::Show { id } => {
            let flight = store
                .get_flight(&id)
                .ok_or_else(|| Error::flight_not_found(&id))?;
            print_flight_detail(flight);
        }
        FlightsCommand::Draft => {
            let draft = FlightRecord::draft(&config.defaults);
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        FlightsCommand::Save { file } => {
            let record: FlightRecord = read_json(&file)?;
            let id = store.save_flight(record.recompute())?;
            println!("Saved flight {id}");
        }
        FlightsCommand::Delete { id, yes } => {
            if store.get_flight(&id).is_none() {
                println!("No flight with id {id}");
            } else if yes {
                store.delete_flight(&id)?;
                println!("Deleted flight {id}");
            } else {
                println!("Are you sure you want to delete flight {id}?");
                println!("Use --yes to confirm.");
            }
        }
    }
    Ok(())
}

fn handle_services(store: &mut Store, cmd: ServicesCommand) -> anyhow::Result<()> {
    match cmd {
        ServicesCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.list_services())?);
            } else if store.list_services().is_empty() {
                println!("No service records.");
            } else {
                for service in store.list_services() {
                    println!(
                        "{:<10}  {:<6}  {:<16}  {:<10}  qty {:>4}  {:>10.2}  {}",
                        service.date,
                        service.station,
                        service.service_type,
                        service.invoice,
                        service.quantity,
                        service.cost,
                        service.details
                    );
                }
            }
        }
        ServicesCommand::Add(args) => {
            store.add_service(service_from_args(args))?;
            println!("Service record added.");
        }
    }
    Ok(())
}

fn service_from_args(args: AddServiceArgs) -> ServiceRecord {
    ServiceRecord {
        date: args.date,
        station: args.station,
        invoice: args.invoice,
        service_type: args.service_type,
        quantity: args.quantity.trim().parse().unwrap_or(0),
        cost: args.cost.trim().parse().unwrap_or(0.0),
        details: args.details,
    }
}

fn handle_dashboard(store: &Store, config: &Config, json: bool) -> anyhow::Result<()> {
    let flights = store.list_flights();
    let stats = compute_dashboard_stats(flights);
    let recent = recent_activity(flights, config.dashboard.recent_limit);

    if json {
        let out = serde_json::json!({
            "stats": stats,
            "recentActivity": recent,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Logbook Dashboard");
    println!("=================");
    println!();
    println!("  Flights:          {}", stats.total_flights);
    println!("  Routes:           {}", stats.total_routes);
    println!("  Aircraft:         {}", stats.unique_aircraft);
    println!("  This month:       {}", stats.monthly_flights);
    println!();
    println!("  Flight time:      {:.1} h", stats.total_flight_time);
    println!("  Block time:       {:.1} h", stats.total_block_time);
    println!("  Duty time:        {:.1} h", stats.total_duty_time);
    println!("  Night:            {:.1} h", stats.total_night_hours);
    println!("  IFR:              {:.1} h", stats.total_ifr_hours);
    println!("  Landings:         {}", stats.total_landings);
    println!("  Passengers:       {}", stats.total_pax);
    println!();
    println!("Recent Activity");
    println!("---------------");
    if recent.is_empty() {
        println!("  (none)");
    }
    for flight in recent {
        print_flight_line(flight);
    }
    Ok(())
}

fn handle_duration(start: &str, end: &str) -> anyhow::Result<()> {
    let start: ClockTime = start.parse()?;
    let end: ClockTime = end.parse()?;
    println!("{}", end - start);
    Ok(())
}

fn handle_import(store: &mut Store, cmd: &ImportCommand) -> anyhow::Result<()> {
    let dump: Value = read_json(&cmd.file)?;
    let flights: Vec<FlightRecord> = collection_from_dump(&dump, FLIGHTS_KEY)?;
    let services: Vec<ServiceRecord> = collection_from_dump(&dump, SERVICES_KEY)?;

    let existing = store.list_flights().len() + store.list_services().len();
    if existing > 0 && !cmd.yes {
        println!(
            "This will replace {} flight(s) and {} service record(s).",
            store.list_flights().len(),
            store.list_services().len()
        );
        println!("Use --yes to confirm.");
        return Ok(());
    }

    store.replace_all(flights, services)?;
    println!(
        "Imported {} flight(s) and {} service record(s).",
        store.list_flights().len(),
        store.list_services().len()
    );
    Ok(())
}

/// Read one collection out of an exported dump.
///
/// Browser storage exports hold each collection as a JSON string; plain
/// exports hold the array directly. A missing key is an empty collection.
fn collection_from_dump<T: DeserializeOwned>(dump: &Value, key: &str) -> anyhow::Result<Vec<T>> {
    let items = match dump.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(raw)) => serde_json::from_str(raw),
        Some(other) => serde_json::from_value(other.clone()),
    };
    items.with_context(|| format!("decoding {key}"))
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Dashboard]");
                println!("  Recent limit:       {}", config.dashboard.recent_limit);
                println!();
                println!("[Defaults]");
                println!("  Aircraft type:      {}", config.defaults.aircraft_type);
                println!(
                    "  Registration:       {}",
                    config.defaults.aircraft_registration
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn print_flight_line(flight: &FlightRecord) {
    let path = flight
        .routes
        .iter()
        .map(|r| format!("{}-{}", r.from, r.to))
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "{}  {:<10}  {:<8}  {:<8}  {:<24}  flt {:>5.2}  blk {:>5.2}  {}",
        flight.id,
        flight.journey_start_date,
        flight.trip_number,
        flight.aircraft_registration,
        path,
        flight.totals.flight,
        flight.totals.block,
        flight.type_of_flight.labels().join(", ")
    );
}

fn print_flight_detail(flight: &FlightRecord) {
    println!("Flight {}", flight.id);
    println!("  Trip:          {}", flight.trip_number);
    println!(
        "  Journey:       {} to {}",
        flight.journey_start_date, flight.journey_end_date
    );
    println!(
        "  Aircraft:      {} {}",
        flight.aircraft_type, flight.aircraft_registration
    );
    println!("  Type:          {}", flight.type_of_flight.labels().join(", "));
    println!("  Crew:          {}", flight.crew_name);
    println!();
    for (i, route) in flight.routes.iter().enumerate() {
        let t = &route.recorded_timing;
        println!("  Route {}: {} -> {} ({})", i + 1, route.from, route.to, route.date);
        println!(
            "    Off {}  T/O {}  Ldg {}  On {}",
            display_time(&t.off),
            display_time(&t.take_off),
            display_time(&t.landing),
            display_time(&t.blocks_on)
        );
        println!(
            "    Flight {}  Block {}  Night {:.2}  IFR {:.2}  Ldgs {}  Pax {}",
            display_duration(&t.flight_time),
            display_duration(&t.block_time),
            route.night_ifr_appr.night_hrs,
            route.night_ifr_appr.ifr_hrs,
            route.landings(),
            route.pax
        );
    }
    println!();
    println!(
        "  Duty:          {} - {} ({:.2} h)",
        display_time(&flight.duty_period.start),
        display_time(&flight.duty_period.end),
        flight.duty_period.total
    );
    let totals = &flight.totals;
    println!(
        "  Totals:        flight {:.2}  block {:.2}  night {:.2}  IFR {:.2}  ldgs {}  pax {}",
        totals.flight, totals.block, totals.night_hrs, totals.ifr_hrs, totals.ldgs, totals.pax
    );
}
