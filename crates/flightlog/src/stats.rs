//! Logbook-wide statistics for the dashboard.
//!
//! Everything here is a pure function of the flight collection and cheap
//! enough to recompute on every render.

use std::collections::HashSet;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::record::FlightRecord;
use crate::time::round_to;

/// Aggregates across all flight records.
///
/// Hour sums are rounded to one decimal place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of flight records.
    pub total_flights: usize,
    /// Number of routes across all records.
    pub total_routes: usize,
    /// Distinct aircraft registrations.
    pub unique_aircraft: usize,
    /// Records whose journey starts in the current month.
    pub monthly_flights: usize,
    /// Flight hours.
    pub total_flight_time: f64,
    /// Block hours.
    pub total_block_time: f64,
    /// Duty hours.
    pub total_duty_time: f64,
    /// Night hours.
    pub total_night_hours: f64,
    /// IFR hours.
    pub total_ifr_hours: f64,
    /// Landings.
    pub total_landings: u64,
    /// Passengers.
    pub total_pax: u64,
}

/// Dashboard statistics as of the local current date.
#[must_use]
pub fn compute_dashboard_stats(flights: &[FlightRecord]) -> DashboardStats {
    compute_dashboard_stats_at(flights, Local::now().date_naive())
}

/// Dashboard statistics with "this month" taken from `today`.
#[must_use]
pub fn compute_dashboard_stats_at(flights: &[FlightRecord], today: NaiveDate) -> DashboardStats {
    let hours = |f: fn(&FlightRecord) -> f64| round_to(flights.iter().map(f).sum(), 1);

    let unique_aircraft = flights
        .iter()
        .map(|f| f.aircraft_registration.as_str())
        .collect::<HashSet<_>>()
        .len();

    let monthly_flights = flights
        .iter()
        .filter_map(|f| journey_start(&f.journey_start_date))
        .filter(|d| d.year() == today.year() && d.month() == today.month())
        .count();

    DashboardStats {
        total_flights: flights.len(),
        total_routes: flights.iter().map(|f| f.routes.len()).sum(),
        unique_aircraft,
        monthly_flights,
        total_flight_time: hours(|f| f.totals.flight),
        total_block_time: hours(|f| f.totals.block),
        total_duty_time: hours(|f| f.duty_period.total),
        total_night_hours: hours(|f| f.totals.night_hrs),
        total_ifr_hours: hours(|f| f.totals.ifr_hrs),
        total_landings: flights.iter().map(|f| u64::from(f.totals.ldgs)).sum(),
        total_pax: flights.iter().map(|f| u64::from(f.totals.pax)).sum(),
    }
}

/// The first `limit` records in store order.
///
/// Store order is insertion order, so this is only "most recent" when trips
/// were logged chronologically.
#[must_use]
pub fn recent_activity(flights: &[FlightRecord], limit: usize) -> &[FlightRecord] {
    &flights[..flights.len().min(limit)]
}

/// Parse the date part of a journey start (`YYYY-MM-DD`, optionally followed
/// by a time).
fn journey_start(value: &str) -> Option<NaiveDate> {
    let date = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DutyPeriod, Route, Totals};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn flight(reg: &str, start: &str, routes: usize, totals: Totals, duty: f64) -> FlightRecord {
        FlightRecord {
            aircraft_registration: reg.to_string(),
            journey_start_date: start.to_string(),
            routes: vec![Route::default(); routes],
            totals,
            duty_period: DutyPeriod {
                total: duty,
                ..DutyPeriod::default()
            },
            ..FlightRecord::default()
        }
    }

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(
            compute_dashboard_stats_at(&[], today()),
            DashboardStats::default()
        );
        assert_eq!(compute_dashboard_stats(&[]), DashboardStats::default());
    }

    #[test]
    fn test_counts() {
        let flights = vec![
            flight("T7-PYD", "2024-05-02", 2, Totals::default(), 0.0),
            flight("T7-PYD", "2024-04-30", 1, Totals::default(), 0.0),
            flight("A6-ABC", "2023-05-10", 3, Totals::default(), 0.0),
            flight("A6-XYZ", "2024-05-31T08:00", 1, Totals::default(), 0.0),
        ];
        let stats = compute_dashboard_stats_at(&flights, today());

        assert_eq!(stats.total_flights, 4);
        assert_eq!(stats.total_routes, 7);
        assert_eq!(stats.unique_aircraft, 3);
        assert_eq!(stats.monthly_flights, 2);
    }

    #[test]
    fn test_unparsable_start_date_not_monthly() {
        let flights = vec![
            flight("X", "", 1, Totals::default(), 0.0),
            flight("X", "17/05/2024", 1, Totals::default(), 0.0),
        ];
        assert_eq!(compute_dashboard_stats_at(&flights, today()).monthly_flights, 0);
    }

    #[test]
    fn test_sums_are_rounded_to_one_decimal() {
        let a = Totals {
            flight: 1.67,
            block: 2.0,
            night_hrs: 0.25,
            ifr_hrs: 1.04,
            ldgs: 2,
            pax: 8,
            ..Totals::default()
        };
        let b = Totals {
            flight: 2.5,
            block: 2.92,
            night_hrs: 0.0,
            ifr_hrs: 0.5,
            ldgs: 1,
            pax: 3,
            ..Totals::default()
        };
        let flights = vec![
            flight("A", "2024-01-01", 1, a, 8.33),
            flight("B", "2024-01-02", 1, b, 0.0),
        ];
        let stats = compute_dashboard_stats_at(&flights, today());

        assert_eq!(stats.total_flight_time, 4.2);
        assert_eq!(stats.total_block_time, 4.9);
        assert_eq!(stats.total_duty_time, 8.3);
        assert_eq!(stats.total_night_hours, 0.3);
        assert_eq!(stats.total_ifr_hours, 1.5);
        assert_eq!(stats.total_landings, 3);
        assert_eq!(stats.total_pax, 11);
    }

    #[test]
    fn test_recent_activity_is_store_order() {
        let flights: Vec<_> = ["2024-05-01", "2023-01-01", "2024-03-01"]
            .iter()
            .map(|d| flight("A", d, 1, Totals::default(), 0.0))
            .collect();

        let recent = recent_activity(&flights, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].journey_start_date, "2024-05-01");
        assert_eq!(recent[1].journey_start_date, "2023-01-01");

        assert_eq!(recent_activity(&flights, 5).len(), 3);
        assert!(recent_activity(&[], 5).is_empty());
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_string(&DashboardStats::default()).unwrap();
        assert!(json.contains("totalFlights"));
        assert!(json.contains("monthlyFlights"));
    }
}
