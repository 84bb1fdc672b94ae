//! The logbook's record collections and their persistence.
//!
//! [`RecordStore`] owns the flight and service collections for the life of
//! the process. It is hydrated from a [`KeyValueStore`] on open and writes a
//! whole collection back on every mutation. Derived fields are never touched
//! here; callers run [`FlightRecord::recompute`] before saving.
//!
//! A stored collection that cannot be decoded is shown as empty but is not
//! overwritten until that collection is explicitly changed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::record::{FlightRecord, ServiceRecord};
use crate::storage::KeyValueStore;

/// Key holding the serialized flight collection.
pub const FLIGHTS_KEY: &str = "flightLogbook_flights";

/// Key holding the serialized service collection.
pub const SERVICES_KEY: &str = "flightLogbook_services";

/// In-memory flight and service collections backed by a key-value store.
///
/// Flights keep insertion order; an update replaces a record in place.
/// Services are append-only.
#[derive(Debug)]
pub struct RecordStore<S> {
    backend: S,
    flights: Vec<FlightRecord>,
    services: Vec<ServiceRecord>,
    /// Keys whose stored value failed to decode and has not been rewritten.
    unreadable: Vec<&'static str>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Hydrate both collections from `backend`.
    ///
    /// A missing key yields an empty collection. A stored value that fails
    /// to deserialize is logged and also treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend itself cannot be read.
    pub fn open(backend: S) -> Result<Self> {
        let flights = load_collection(&backend, FLIGHTS_KEY)?;
        let services = load_collection(&backend, SERVICES_KEY)?;
        let unreadable = [
            (FLIGHTS_KEY, flights.is_none()),
            (SERVICES_KEY, services.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, failed)| failed.then_some(key))
        .collect();
        let flights = flights.unwrap_or_default();
        let services = services.unwrap_or_default();
        info!(
            flights = flights.len(),
            services = services.len(),
            "Logbook loaded"
        );
        Ok(Self {
            backend,
            flights,
            services,
            unreadable,
        })
    }

    /// All flight records, in insertion order.
    #[must_use]
    pub fn list_flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    /// Look up a flight record by id.
    #[must_use]
    pub fn get_flight(&self, id: &str) -> Option<&FlightRecord> {
        self.flights.iter().find(|f| f.id == id)
    }

    /// Insert or replace a flight record and persist the collection.
    ///
    /// A record whose id matches an existing one replaces it in place.
    /// Otherwise it is appended, receiving a fresh id if its id is empty.
    /// Returns the id the record was stored under.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRouteCount`] if the record has fewer than one
    /// or more than three routes, or a backend error if the write fails. On
    /// error the in-memory collection is unchanged.
    pub fn save_flight(&mut self, mut record: FlightRecord) -> Result<String> {
        if !record.has_valid_route_count() {
            return Err(Error::InvalidRouteCount {
                count: record.routes.len(),
            });
        }

        let mut flights = self.flights.clone();
        let position = if record.id.is_empty() {
            None
        } else {
            flights.iter().position(|f| f.id == record.id)
        };

        if let Some(index) = position {
            debug!(id = %record.id, index, "Replacing flight record");
            flights[index] = record.clone();
        } else {
            if record.id.is_empty() {
                record.id = Uuid::new_v4().to_string();
            }
            debug!(id = %record.id, "Appending flight record");
            flights.push(record.clone());
        }

        persist(&mut self.backend, FLIGHTS_KEY, &flights)?;
        self.flights = flights;
        self.mark_written(FLIGHTS_KEY);
        Ok(record.id)
    }

    /// Alias of [`save_flight`](Self::save_flight) named after the submit action.
    ///
    /// # Errors
    ///
    /// See [`save_flight`](Self::save_flight).
    pub fn create_or_update_flight(&mut self, record: FlightRecord) -> Result<String> {
        self.save_flight(record)
    }

    /// Remove the flight record with `id`.
    ///
    /// Returns `false`, without writing, when no such record exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the record is then kept.
    pub fn delete_flight(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.flights.iter().position(|f| f.id == id) else {
            debug!(id, "Delete requested for unknown flight record");
            return Ok(false);
        };

        let mut flights = self.flights.clone();
        flights.remove(index);
        persist(&mut self.backend, FLIGHTS_KEY, &flights)?;
        self.flights = flights;
        self.mark_written(FLIGHTS_KEY);
        debug!(id, "Deleted flight record");
        Ok(true)
    }

    /// All service records, in insertion order.
    #[must_use]
    pub fn list_services(&self) -> &[ServiceRecord] {
        &self.services
    }

    /// Append a service record and persist the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the record is then not added.
    pub fn add_service(&mut self, record: ServiceRecord) -> Result<()> {
        let mut services = self.services.clone();
        services.push(record);
        persist(&mut self.backend, SERVICES_KEY, &services)?;
        self.services = services;
        self.mark_written(SERVICES_KEY);
        debug!(count = self.services.len(), "Appended service record");
        Ok(())
    }

    /// Replace both collections wholesale, e.g. from an exported dump.
    ///
    /// Flight records without an id are given one.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails. Both in-memory collections
    /// are then unchanged, and the stored flight value is put back if the
    /// services write was the one that failed.
    pub fn replace_all(
        &mut self,
        mut flights: Vec<FlightRecord>,
        services: Vec<ServiceRecord>,
    ) -> Result<()> {
        for flight in flights.iter_mut().filter(|f| f.id.is_empty()) {
            flight.id = Uuid::new_v4().to_string();
        }

        let previous = self.backend.get(FLIGHTS_KEY)?;
        persist(&mut self.backend, FLIGHTS_KEY, &flights)?;
        if let Err(err) = persist(&mut self.backend, SERVICES_KEY, &services) {
            let restored = match &previous {
                Some(raw) => self.backend.set(FLIGHTS_KEY, raw),
                None => persist(&mut self.backend, FLIGHTS_KEY, &self.flights),
            };
            if let Err(restore_err) = restored {
                warn!(error = %restore_err, "Could not restore flight collection");
            }
            return Err(err);
        }

        self.flights = flights;
        self.services = services;
        self.unreadable.clear();
        info!(
            flights = self.flights.len(),
            services = self.services.len(),
            "Replaced logbook contents"
        );
        Ok(())
    }

    /// Write both collections to the backend.
    ///
    /// A collection whose stored value failed to decode on open, and that
    /// has not been changed since, is skipped so the stored value survives.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails.
    pub fn flush(&mut self) -> Result<()> {
        if !self.unreadable.contains(&FLIGHTS_KEY) {
            persist(&mut self.backend, FLIGHTS_KEY, &self.flights)?;
        }
        if !self.unreadable.contains(&SERVICES_KEY) {
            persist(&mut self.backend, SERVICES_KEY, &self.services)?;
        }
        Ok(())
    }

    /// Flush and hand back the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn close(mut self) -> Result<S> {
        self.flush()?;
        Ok(self.backend)
    }

    /// Borrow the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn mark_written(&mut self, key: &str) {
        self.unreadable.retain(|k| *k != key);
    }
}

/// Decode the collection stored under `key`.
///
/// `None` means a value is stored but cannot be decoded; a missing key is
/// an empty collection.
fn load_collection<S, T>(backend: &S, key: &str) -> Result<Option<Vec<T>>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = backend.get(key)? else {
        return Ok(Some(Vec::new()));
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(Some(items)),
        Err(e) => {
            warn!(key, error = %e, "Stored collection is unreadable, starting empty");
            Ok(None)
        }
    }
}

fn persist<S, T>(backend: &mut S, key: &str, items: &[T]) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize,
{
    let json = serde_json::to_string(items)?;
    backend.set(key, &json)
}
