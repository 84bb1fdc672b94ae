//! Logbook record types.
//!
//! The serialized form matches the JSON the logbook has always written:
//! camelCase keys, nested timing/count groups per route, and an array per
//! collection. Every struct defaults missing fields to their zero value so
//! older or partial documents still load.
//!
//! Records are edited by value: the `with_*` helpers consume a record and
//! return the updated copy, and nothing derived is refreshed until
//! [`FlightRecord::recompute`] is called.

use serde::{Deserialize, Serialize};

use crate::config::DefaultsConfig;
use crate::time::{compute_duration, compute_duty_hours};
use crate::totals::compute_totals;

/// Maximum number of routes a single trip may hold.
pub const MAX_ROUTES: usize = 3;

/// Minimum number of routes a single trip must hold.
pub const MIN_ROUTES: usize = 1;

/// Clock readings for one leg, plus the two durations derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordedTiming {
    /// Off blocks.
    pub off: String,
    /// Wheels up.
    pub take_off: String,
    /// Touchdown.
    pub landing: String,
    /// On blocks.
    pub blocks_on: String,
    /// Derived `take_off` to `landing`, `HH:MM`.
    pub flight_time: String,
    /// Derived `off` to `blocks_on`, `HH:MM`.
    pub block_time: String,
}

impl RecordedTiming {
    /// Replace the four clock readings, keeping the derived durations.
    #[must_use]
    pub fn with_times(
        self,
        off: impl Into<String>,
        take_off: impl Into<String>,
        landing: impl Into<String>,
        blocks_on: impl Into<String>,
    ) -> Self {
        Self {
            off: off.into(),
            take_off: take_off.into(),
            landing: landing.into(),
            blocks_on: blocks_on.into(),
            ..self
        }
    }

    /// Derive `flight_time` and `block_time` where both ends are known.
    ///
    /// A pair with a missing or malformed end leaves its derived field as it was.
    #[must_use]
    pub fn derive_durations(self) -> Self {
        let flight_time =
            compute_duration(&self.take_off, &self.landing).unwrap_or(self.flight_time);
        let block_time = compute_duration(&self.off, &self.blocks_on).unwrap_or(self.block_time);
        Self {
            flight_time,
            block_time,
            ..self
        }
    }
}

/// Night, instrument and approach figures for one leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NightIfrAppr {
    /// Night hours, decimal.
    pub night_hrs: f64,
    /// Instrument hours, decimal.
    pub ifr_hrs: f64,
    /// Approach type, free text.
    pub appr_type: String,
}

/// Take-off and landing counts for one leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeOffLanding {
    /// Day take-offs/landings.
    pub day: u32,
    /// Night take-offs/landings.
    pub night: u32,
}

/// Informational local/UTC time pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtcPair {
    /// Local time.
    pub local: String,
    /// UTC time.
    pub utc: String,
}

/// One origin-to-destination leg of a trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Route {
    /// Date of the leg.
    pub date: String,
    /// Origin station.
    pub from: String,
    /// Destination station.
    pub to: String,
    /// Clock readings and derived durations.
    pub recorded_timing: RecordedTiming,
    /// Night, IFR and approach figures.
    pub night_ifr_appr: NightIfrAppr,
    /// Take-off/landing counts.
    pub take_off_landing: TakeOffLanding,
    /// Passengers carried.
    pub pax: u32,
    /// Local/UTC pair.
    pub utc: UtcPair,
}

impl Route {
    /// A blank leg with the given endpoints.
    #[must_use]
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            ..Self::default()
        }
    }

    /// Replace the timing block.
    #[must_use]
    pub fn with_timing(self, recorded_timing: RecordedTiming) -> Self {
        Self {
            recorded_timing,
            ..self
        }
    }

    /// Replace the take-off/landing counts.
    #[must_use]
    pub fn with_landings(self, day: u32, night: u32) -> Self {
        Self {
            take_off_landing: TakeOffLanding { day, night },
            ..self
        }
    }

    /// Replace the night and IFR hours, keeping the approach type.
    #[must_use]
    pub fn with_night_ifr(self, night_hrs: f64, ifr_hrs: f64) -> Self {
        Self {
            night_ifr_appr: NightIfrAppr {
                night_hrs,
                ifr_hrs,
                ..self.night_ifr_appr
            },
            ..self
        }
    }

    /// Replace the passenger count.
    #[must_use]
    pub fn with_pax(self, pax: u32) -> Self {
        Self { pax, ..self }
    }

    /// Total take-offs/landings, day and night, saturating at `u32::MAX`.
    #[must_use]
    pub fn landings(&self) -> u32 {
        self.take_off_landing
            .day
            .saturating_add(self.take_off_landing.night)
    }
}

/// Non-exclusive flight purpose flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct TypeOfFlight {
    /// Revenue.
    pub revenue: bool,
    /// Ferry.
    pub ferry: bool,
    /// Maintenance.
    pub maintenance: bool,
    /// Training.
    pub training: bool,
    /// Demonstration.
    pub demo: bool,
    /// Company.
    pub company: bool,
    /// Owner.
    pub owner: bool,
    /// Mercy.
    pub mercy: bool,
}

impl TypeOfFlight {
    /// Labels of the set flags, in declaration order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.revenue, "Revenue"),
            (self.ferry, "Ferry"),
            (self.maintenance, "Maintenance"),
            (self.training, "Training"),
            (self.demo, "Demo"),
            (self.company, "Company"),
            (self.owner, "Owner"),
            (self.mercy, "Mercy"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

/// Crew positions held on the trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignedDuty {
    /// Pilot in command.
    pub captain: bool,
    /// First officer.
    pub first_officer: bool,
    /// OCM crew.
    pub ocm_crew: bool,
}

/// Duty period bounds and derived length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DutyPeriod {
    /// Report time.
    pub start: String,
    /// Release time.
    pub end: String,
    /// Derived length in decimal hours.
    pub total: f64,
}

/// Per-trip totals rolled up from the routes.
///
/// `appr` and the FDP planning fields are stored but never derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Totals {
    /// Flight hours.
    pub flight: f64,
    /// Block hours.
    pub block: f64,
    /// Night hours.
    pub night_hrs: f64,
    /// IFR hours.
    pub ifr_hrs: f64,
    /// Approach count.
    pub appr: u32,
    /// Landings, day and night.
    pub ldgs: u32,
    /// Day take-offs/landings.
    pub day_no: u32,
    /// Passengers.
    pub pax: u32,
    /// Totals date.
    pub date: String,
    /// FDP end.
    pub fdp_end: String,
    /// Rest.
    pub rest: f64,
    /// FDP start.
    pub fdp_start: f64,
    /// Split duty.
    pub split_duty: f64,
    /// FDP allowed.
    pub fdp_allowed: f64,
    /// Extended FDP.
    pub extended_fdp: f64,
}

impl Totals {
    /// Take the route-derived figures from `computed`, keeping this value's
    /// stored-only fields.
    #[must_use]
    pub fn merge_computed(self, computed: Totals) -> Self {
        Self {
            flight: computed.flight,
            block: computed.block,
            night_hrs: computed.night_hrs,
            ifr_hrs: computed.ifr_hrs,
            appr: computed.appr,
            ldgs: computed.ldgs,
            day_no: computed.day_no,
            pax: computed.pax,
            ..self
        }
    }
}

/// One trip: 1 to 3 routes, crew, duty period and totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightRecord {
    /// Opaque unique id; empty until the store assigns one.
    pub id: String,
    /// First day of the journey, `YYYY-MM-DD`.
    pub journey_start_date: String,
    /// Last day of the journey, `YYYY-MM-DD`.
    pub journey_end_date: String,
    /// Trip number.
    pub trip_number: String,
    /// Aircraft type.
    pub aircraft_type: String,
    /// Aircraft registration.
    pub aircraft_registration: String,
    /// Purpose flags.
    pub type_of_flight: TypeOfFlight,
    /// Legs flown, in order.
    pub routes: Vec<Route>,
    /// Crew positions held.
    pub assigned_duty: AssignedDuty,
    /// Crew names.
    pub crew_name: String,
    /// Duty period.
    pub duty_period: DutyPeriod,
    /// Derived totals.
    pub totals: Totals,
}

impl FlightRecord {
    /// A new-trip draft: one blank route, revenue flight, default aircraft.
    #[must_use]
    pub fn draft(defaults: &DefaultsConfig) -> Self {
        Self {
            aircraft_type: defaults.aircraft_type.clone(),
            aircraft_registration: defaults.aircraft_registration.clone(),
            type_of_flight: TypeOfFlight {
                revenue: true,
                ..TypeOfFlight::default()
            },
            routes: vec![Route::default()],
            ..Self::default()
        }
    }

    /// Append a blank route unless the trip already has [`MAX_ROUTES`].
    #[must_use]
    pub fn with_route_added(mut self) -> Self {
        if self.routes.len() < MAX_ROUTES {
            self.routes.push(Route::default());
        }
        self
    }

    /// Remove the route at `index` unless only [`MIN_ROUTES`] remain.
    ///
    /// Out-of-range indices are ignored.
    #[must_use]
    pub fn with_route_removed(mut self, index: usize) -> Self {
        if self.routes.len() > MIN_ROUTES && index < self.routes.len() {
            self.routes.remove(index);
        }
        self
    }

    /// Replace the route at `index` with `update(route)`.
    ///
    /// Out-of-range indices leave the record unchanged.
    #[must_use]
    pub fn with_route(mut self, index: usize, update: impl FnOnce(Route) -> Route) -> Self {
        if let Some(slot) = self.routes.get_mut(index) {
            *slot = update(std::mem::take(slot));
        }
        self
    }

    /// Replace the duty period bounds, keeping the stored total.
    #[must_use]
    pub fn with_duty_period(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            duty_period: DutyPeriod {
                start: start.into(),
                end: end.into(),
                ..self.duty_period
            },
            ..self
        }
    }

    /// Refresh every derived field: route durations, duty total, totals.
    ///
    /// Run this on submit, before handing the record to the store.
    #[must_use]
    pub fn recompute(self) -> Self {
        let routes: Vec<Route> = self
            .routes
            .into_iter()
            .map(|r| Route {
                recorded_timing: r.recorded_timing.derive_durations(),
                ..r
            })
            .collect();

        let duty_total = compute_duty_hours(&self.duty_period.start, &self.duty_period.end)
            .unwrap_or(self.duty_period.total);

        let totals = self.totals.merge_computed(compute_totals(&routes));

        Self {
            routes,
            duty_period: DutyPeriod {
                total: duty_total,
                ..self.duty_period
            },
            totals,
            ..self
        }
    }

    /// Whether the route count is within `MIN_ROUTES..=MAX_ROUTES`.
    #[must_use]
    pub fn has_valid_route_count(&self) -> bool {
        (MIN_ROUTES..=MAX_ROUTES).contains(&self.routes.len())
    }
}

/// One maintenance or service event. Identified only by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceRecord {
    /// Service date.
    pub date: String,
    /// Station where the service was performed.
    pub station: String,
    /// Invoice number.
    pub invoice: String,
    /// Kind of service.
    pub service_type: String,
    /// Quantity.
    pub quantity: u32,
    /// Cost.
    pub cost: f64,
    /// Free-text details.
    pub details: String,
}
