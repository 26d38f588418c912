use crate::{
    config::EstimatorConfig,
    distance::{leg_distances, total_distance_miles},
    error::PlanError,
    models::{ChargingStopEstimate, ClockTime, TripEstimate, VehicleProfile, Waypoint},
    summary::summarize,
    vehicles::validate_range,
};

/// Estimate battery use, charging time and arrival times for a trip.
///
/// # Model
///
/// - Every leg is driven at `average_speed_mph` over its great-circle distance.
/// - The battery at a stop is derived from the leg arriving there alone,
///   as if the car left the previous waypoint full:
///   ```text
///   used    = min(100, round(leg / range * 100))
///   arrival = max(0, 100 - used)
///   ```
/// - Each stop charges to `charge_target_percent`:
///   `max(min_charging_minutes, round((target - arrival) * minutes_per_percent))`.
/// - Arrival clocks are carried left to right: departure, plus every leg
///   driven so far, plus the charging time of every earlier stop.
///
/// The estimate is a pure function of its inputs.
pub fn estimate_trip(
    waypoints: &[Waypoint],
    vehicle: &VehicleProfile,
    config: &EstimatorConfig,
) -> Result<TripEstimate, PlanError> {
    if waypoints.len() < 2 {
        return Err(PlanError::TooFewWaypoints(waypoints.len()));
    }
    let range_miles = validate_range(vehicle.range_miles)?;
    for waypoint in waypoints {
        validate_waypoint(waypoint)?;
    }

    let legs_miles = leg_distances(waypoints);
    let total_distance = total_distance_miles(&legs_miles);
    let departure = f64::from(config.departure_minutes());

    let interior = &waypoints[1..waypoints.len() - 1];
    let mut elapsed_minutes = 0.0;
    let mut stops = Vec::with_capacity(interior.len());

    for (stop, &leg_miles) in interior.iter().zip(&legs_miles) {
        elapsed_minutes += leg_miles / config.average_speed_mph * 60.0;

        let battery = battery_at_arrival(leg_miles, range_miles);
        let charging_minutes = charging_minutes(battery, config);

        stops.push(ChargingStopEstimate {
            label: stop.label.clone(),
            leg_distance_miles: leg_miles,
            battery_percent_at_arrival: battery,
            charge_target_percent: config.charge_target_percent,
            charging_minutes,
            arrival: clock_at(departure + elapsed_minutes),
        });

        elapsed_minutes += charging_minutes;
    }

    let summary = summarize(total_distance, stops.len(), range_miles, config);
    tracing::debug!(
        "estimated trip: {} legs, {:.0} miles, {} stops",
        legs_miles.len(),
        total_distance,
        stops.len()
    );

    Ok(TripEstimate {
        legs_miles,
        stops,
        summary,
    })
}

/// Battery percent left on arrival after driving `leg_miles` from full.
pub fn battery_at_arrival(leg_miles: f64, range_miles: f64) -> u8 {
    let used = (leg_miles / range_miles * 100.0).round().min(100.0);
    (100.0 - used).max(0.0) as u8
}

pub fn charging_minutes(battery_percent: u8, config: &EstimatorConfig) -> f64 {
    let missing = f64::from(config.charge_target_percent) - f64::from(battery_percent);
    (missing * config.minutes_per_percent)
        .round()
        .max(config.min_charging_minutes)
}

pub(crate) fn clock_at(minutes_since_midnight: f64) -> ClockTime {
    ClockTime::from_minutes(minutes_since_midnight.round().max(0.0) as u32)
}

fn validate_waypoint(waypoint: &Waypoint) -> Result<(), PlanError> {
    let valid = waypoint.lat.is_finite()
        && waypoint.lon.is_finite()
        && (-90.0..=90.0).contains(&waypoint.lat)
        && (-180.0..=180.0).contains(&waypoint.lon);
    if valid {
        Ok(())
    } else {
        Err(PlanError::InvalidCoordinate {
            label: waypoint.label.clone(),
            lat: waypoint.lat,
            lon: waypoint.lon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(range_miles: f64) -> VehicleProfile {
        VehicleProfile {
            model_id: "test".into(),
            range_miles,
        }
    }

    /// Points on the equator `miles` apart, so legs come out as round numbers.
    fn along_equator(legs: &[f64]) -> Vec<Waypoint> {
        let degrees_per_mile = 360.0 / (2.0 * std::f64::consts::PI * crate::distance::EARTH_RADIUS_MILES);
        let mut lon = 0.0;
        let mut points = vec![Waypoint::new(0.0, lon, "Start")];
        for (i, leg) in legs.iter().enumerate() {
            lon += leg * degrees_per_mile;
            let label = if i + 1 == legs.len() {
                "Destination".to_string()
            } else {
                format!("Stop {}", i + 1)
            };
            points.push(Waypoint::new(0.0, lon, label));
        }
        points
    }

    #[test]
    fn three_waypoint_reference_trip() {
        let waypoints = along_equator(&[200.0, 150.0]);
        let estimate = estimate_trip(&waypoints, &vehicle(300.0), &EstimatorConfig::default())
            .expect("estimate");

        assert_eq!(estimate.legs_miles, vec![200.0, 150.0]);
        assert_eq!(estimate.stops.len(), 1);

        let stop = &estimate.stops[0];
        assert_eq!(stop.label, "Stop 1");
        assert_eq!(stop.battery_percent_at_arrival, 33);
        assert_eq!(stop.charge_target_percent, 80);
        assert_eq!(stop.charging_minutes, 24.0);
        assert_eq!(stop.arrival, ClockTime::from_minutes(12 * 60 + 20));

        assert_eq!(estimate.summary.total_distance_miles, 350.0);
        assert_eq!(estimate.summary.stop_count, 1);
    }

    #[test]
    fn arrival_times_accumulate_prior_charging() {
        let waypoints = along_equator(&[120.0, 60.0, 30.0]);
        let estimate = estimate_trip(&waypoints, &vehicle(300.0), &EstimatorConfig::default())
            .expect("estimate");

        let first = &estimate.stops[0];
        let second = &estimate.stops[1];
        // 120 mi at 60 mph = 2h
        assert_eq!(first.arrival, ClockTime::from_minutes(11 * 60));
        let expected_second = 11 * 60 + first.charging_minutes as u32 + 60;
        assert_eq!(second.arrival, ClockTime::from_minutes(expected_second));
    }

    #[test]
    fn late_departure_rolls_arrivals_past_midnight() {
        let config = EstimatorConfig {
            departure: chrono::NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            ..EstimatorConfig::default()
        };
        let waypoints = along_equator(&[120.0, 90.0, 60.0]);
        let estimate = estimate_trip(&waypoints, &vehicle(300.0), &config).expect("estimate");

        // 22:00 + 2h driving
        let first = &estimate.stops[0];
        assert_eq!(first.battery_percent_at_arrival, 60);
        assert_eq!(first.charging_minutes, 10.0);
        assert_eq!(first.arrival, ClockTime::from_minutes(24 * 60));
        assert_eq!(first.arrival.day_offset, 1);
        assert_eq!(first.arrival.hour, 0);

        // + 10 min charging + 90 min driving
        let second = &estimate.stops[1];
        assert_eq!(second.arrival.day_offset, 1);
        assert_eq!((second.arrival.hour, second.arrival.minute), (1, 40));

        assert_eq!(estimate.summary.destination_arrival.day_offset, 1);
    }

    #[test]
    fn direct_trip_has_no_stops() {
        let waypoints = along_equator(&[100.0]);
        let estimate = estimate_trip(&waypoints, &vehicle(300.0), &EstimatorConfig::default())
            .expect("estimate");
        assert!(estimate.stops.is_empty());
        assert_eq!(estimate.summary.stop_count, 0);
        assert_eq!(estimate.summary.total_travel_time.hours, 1);
        assert_eq!(estimate.summary.total_travel_time.minutes, 40);
    }

    #[test]
    fn battery_clamps_when_leg_exceeds_range() {
        assert_eq!(battery_at_arrival(400.0, 300.0), 0);
        assert_eq!(battery_at_arrival(300.0, 300.0), 0);
        assert_eq!(battery_at_arrival(0.0, 300.0), 100);
    }

    #[test]
    fn charging_respects_floor() {
        let config = EstimatorConfig::default();
        assert_eq!(charging_minutes(80, &config), 10.0);
        assert_eq!(charging_minutes(95, &config), 10.0);
        assert_eq!(charging_minutes(0, &config), 40.0);
    }

    #[test]
    fn estimate_is_idempotent() {
        let waypoints = along_equator(&[180.0, 220.0, 90.0]);
        let config = EstimatorConfig::default();
        let first = estimate_trip(&waypoints, &vehicle(250.0), &config).unwrap();
        let second = estimate_trip(&waypoints, &vehicle(250.0), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_invalid_inputs() {
        let config = EstimatorConfig::default();
        let single = along_equator(&[]);
        assert!(matches!(
            estimate_trip(&single, &vehicle(300.0), &config),
            Err(PlanError::TooFewWaypoints(1))
        ));

        let waypoints = along_equator(&[100.0]);
        assert!(matches!(
            estimate_trip(&waypoints, &vehicle(0.0), &config),
            Err(PlanError::InvalidRange(_))
        ));

        let mut broken = along_equator(&[100.0]);
        broken[1].lat = f64::NAN;
        assert!(matches!(
            estimate_trip(&broken, &vehicle(300.0), &config),
            Err(PlanError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn configurable_assumptions_are_honoured() {
        let config = EstimatorConfig {
            average_speed_mph: 50.0,
            charge_target_percent: 90,
            minutes_per_percent: 1.0,
            departure: chrono::NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            ..EstimatorConfig::default()
        };
        let waypoints = along_equator(&[150.0, 100.0]);
        let estimate = estimate_trip(&waypoints, &vehicle(300.0), &config).unwrap();
        let stop = &estimate.stops[0];
        assert_eq!(stop.battery_percent_at_arrival, 50);
        assert_eq!(stop.charge_target_percent, 90);
        assert_eq!(stop.charging_minutes, 40.0);
        assert_eq!(stop.arrival, ClockTime::from_minutes(9 * 60));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_battery_non_increasing_in_distance(
                range in 50.0f64..600.0,
                a in 0.0f64..1_000.0,
                b in 0.0f64..1_000.0
            ) {
                let (short, long) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(battery_at_arrival(long, range) <= battery_at_arrival(short, range));
                prop_assert!(battery_at_arrival(long, range) <= 100);
            }

            #[test]
            fn prop_charging_never_below_floor(battery in 0u8..=100) {
                let config = EstimatorConfig::default();
                prop_assert!(charging_minutes(battery, &config) >= config.min_charging_minutes);
            }

            #[test]
            fn prop_more_depleted_charges_longer(a in 0u8..=100, b in 0u8..=100) {
                let config = EstimatorConfig::default();
                let (low, high) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(charging_minutes(low, &config) >= charging_minutes(high, &config));
            }
        }
    }
}
