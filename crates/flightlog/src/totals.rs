//! Roll-up of a trip's routes into its [`Totals`].

use tracing::trace;

use crate::record::{Route, Totals};
use crate::time::{duration_minutes, round_to};

/// Sum per-route figures into trip totals.
///
/// Flight and block hours come from the derived `HH:MM` strings (blank
/// strings count as zero) and are rounded to two decimals. Night and IFR
/// hours are plain sums. `appr` is never accumulated, and the stored-only
/// fields are left at their defaults; see [`Totals::merge_computed`].
///
/// The result does not depend on route order.
#[must_use]
pub fn compute_totals(routes: &[Route]) -> Totals {
    let flight_minutes: u64 = routes
        .iter()
        .map(|r| u64::from(duration_minutes(&r.recorded_timing.flight_time)))
        .sum();
    let block_minutes: u64 = routes
        .iter()
        .map(|r| u64::from(duration_minutes(&r.recorded_timing.block_time)))
        .sum();

    let totals = Totals {
        flight: minutes_to_hours(flight_minutes),
        block: minutes_to_hours(block_minutes),
        night_hrs: ordered_sum(routes.iter().map(|r| r.night_ifr_appr.night_hrs)),
        ifr_hrs: ordered_sum(routes.iter().map(|r| r.night_ifr_appr.ifr_hrs)),
        ldgs: saturating_sum(routes.iter().map(Route::landings)),
        day_no: saturating_sum(routes.iter().map(|r| r.take_off_landing.day)),
        pax: saturating_sum(routes.iter().map(|r| r.pax)),
        ..Totals::default()
    };

    trace!(
        routes = routes.len(),
        flight = totals.flight,
        block = totals.block,
        "computed totals"
    );
    totals
}

#[allow(clippy::cast_precision_loss)]
fn minutes_to_hours(minutes: u64) -> f64 {
    round_to(minutes as f64 / 60.0, 2)
}

fn saturating_sum(values: impl Iterator<Item = u32>) -> u32 {
    values.fold(0, u32::saturating_add)
}

/// Sum in ascending order so any permutation of the inputs yields the same bits.
fn ordered_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NightIfrAppr, RecordedTiming, TakeOffLanding};
    use proptest::prelude::*;

    fn route(flight_time: &str, block_time: &str, day: u32, night: u32, pax: u32) -> Route {
        Route {
            recorded_timing: RecordedTiming {
                flight_time: flight_time.to_string(),
                block_time: block_time.to_string(),
                ..RecordedTiming::default()
            },
            take_off_landing: TakeOffLanding { day, night },
            pax,
            ..Route::default()
        }
    }

    #[test]
    fn test_empty_routes() {
        assert_eq!(compute_totals(&[]), Totals::default());
    }

    #[test]
    fn test_sums_across_routes() {
        let routes = vec![
            route("01:30", "01:45", 1, 0, 4).with_night_ifr(0.5, 1.0),
            route("02:20", "02:40", 0, 1, 6).with_night_ifr(1.2, 2.2),
            route("00:50", "01:05", 1, 0, 0),
        ];
        let totals = compute_totals(&routes);

        assert_eq!(totals.flight, 4.67);
        assert_eq!(totals.block, 5.5);
        assert!((totals.night_hrs - 1.7).abs() < 1e-9);
        assert!((totals.ifr_hrs - 3.2).abs() < 1e-9);
        assert_eq!(totals.ldgs, 3);
        assert_eq!(totals.day_no, 2);
        assert_eq!(totals.pax, 10);
    }

    #[test]
    fn test_blank_durations_contribute_zero() {
        let routes = vec![route("", "", 0, 0, 0), route("01:00", "", 0, 0, 0)];
        let totals = compute_totals(&routes);
        assert_eq!(totals.flight, 1.0);
        assert_eq!(totals.block, 0.0);
    }

    #[test]
    fn test_approaches_not_accumulated() {
        let mut r = route("01:00", "01:10", 1, 0, 0);
        r.night_ifr_appr = NightIfrAppr {
            appr_type: "ILS".to_string(),
            ..NightIfrAppr::default()
        };
        assert_eq!(compute_totals(&[r.clone(), r]).appr, 0);
    }

    #[test]
    fn test_placeholder_fields_stay_default() {
        let totals = compute_totals(&[route("03:00", "03:20", 1, 1, 2)]);
        assert!(totals.date.is_empty());
        assert!(totals.fdp_end.is_empty());
        assert_eq!(totals.rest, 0.0);
        assert_eq!(totals.fdp_start, 0.0);
        assert_eq!(totals.split_duty, 0.0);
        assert_eq!(totals.fdp_allowed, 0.0);
        assert_eq!(totals.extended_fdp, 0.0);
    }

    #[test]
    fn test_counts_saturate() {
        let routes = vec![
            route("01:00", "01:10", u32::MAX, 1, u32::MAX),
            route("01:00", "01:10", 1, 0, 1),
        ];
        let totals = compute_totals(&routes);
        assert_eq!(totals.ldgs, u32::MAX);
        assert_eq!(totals.day_no, u32::MAX);
        assert_eq!(totals.pax, u32::MAX);
        assert_eq!(totals.flight, 2.0);
    }

    #[test]
    fn test_idempotent() {
        let routes = vec![route("01:10", "01:25", 1, 0, 3)];
        assert_eq!(compute_totals(&routes), compute_totals(&routes));
    }

    fn arb_hhmm() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            (0..24u32, 0..60u32).prop_map(|(h, m)| format!("{h:02}:{m:02}")),
        ]
    }

    fn arb_route() -> impl Strategy<Value = Route> {
        (
            arb_hhmm(),
            arb_hhmm(),
            0.0..12.0f64,
            0.0..12.0f64,
            0..5u32,
            0..5u32,
            0..300u32,
        )
            .prop_map(|(ft, bt, night, ifr, day, nightn, pax)| {
                route(&ft, &bt, day, nightn, pax).with_night_ifr(night, ifr)
            })
    }

    proptest! {
        #[test]
        fn test_pax_and_landings_are_sums(routes in prop::collection::vec(arb_route(), 1..=3)) {
            let totals = compute_totals(&routes);
            prop_assert_eq!(totals.pax, routes.iter().map(|r| r.pax).sum::<u32>());
            prop_assert_eq!(
                totals.ldgs,
                routes
                    .iter()
                    .map(|r| r.take_off_landing.day + r.take_off_landing.night)
                    .sum::<u32>()
            );
            prop_assert_eq!(
                totals.day_no,
                routes.iter().map(|r| r.take_off_landing.day).sum::<u32>()
            );
        }

        #[test]
        fn test_order_independent(
            (routes, shuffled) in prop::collection::vec(arb_route(), 1..=3)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            prop_assert_eq!(compute_totals(&routes), compute_totals(&shuffled));
        }
    }
}
