//! `flightlog` - a pilot's flight logbook
//!
//! Records trips (routes, timings, crew, duty periods and their totals) and
//! aircraft service entries, persists them to a local key-value store, and
//! derives logbook-wide statistics.
//!
//! The usual edit cycle is: build or load a [`FlightRecord`], apply
//! `with_*` updates, call [`FlightRecord::recompute`], then hand it to
//! [`RecordStore::save_flight`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod stats;
pub mod storage;
pub mod store;
pub mod time;
pub mod totals;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{FlightRecord, Route, ServiceRecord, Totals};
pub use stats::{compute_dashboard_stats, recent_activity, DashboardStats};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::RecordStore;
pub use time::{compute_duration, compute_duty_hours, ClockTime, Elapsed};
pub use totals::compute_totals;
