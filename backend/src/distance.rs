use crate::models::{Coordinate, Waypoint};

pub const EARTH_RADIUS_MILES: f64 = 3_958.8;

/// Great-circle distance in miles, rounded to the nearest whole mile.
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = (sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon).clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    (EARTH_RADIUS_MILES * c).round()
}

pub fn leg_distances(waypoints: &[Waypoint]) -> Vec<f64> {
    waypoints
        .windows(2)
        .map(|w| haversine_miles(w[0].coordinate(), w[1].coordinate()))
        .collect()
}

pub fn total_distance_miles(legs_miles: &[f64]) -> f64 {
    legs_miles.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAN_FRANCISCO: Coordinate = Coordinate {
        lat: 37.7749,
        lon: -122.4194,
    };
    const LOS_ANGELES: Coordinate = Coordinate {
        lat: 34.0522,
        lon: -118.2437,
    };

    #[test]
    fn test_haversine_same_point() {
        assert_eq!(haversine_miles(SAN_FRANCISCO, SAN_FRANCISCO), 0.0);
    }

    #[test]
    fn test_haversine_san_francisco_to_los_angeles() {
        let distance = haversine_miles(SAN_FRANCISCO, LOS_ANGELES);
        assert!(
            (342.0..=352.0).contains(&distance),
            "expected ~347 miles, got {distance}"
        );
    }

    #[test]
    fn test_haversine_antipodal_points() {
        let a = Coordinate { lat: 0.0, lon: 0.0 };
        let b = Coordinate { lat: 0.0, lon: 180.0 };
        let distance = haversine_miles(a, b);
        assert!((12_400.0..=12_500.0).contains(&distance), "got {distance}");
    }

    #[test]
    fn test_haversine_is_whole_miles() {
        let distance = haversine_miles(SAN_FRANCISCO, LOS_ANGELES);
        assert_eq!(distance, distance.round());
    }

    #[test]
    fn test_leg_distances_empty_and_single() {
        assert!(leg_distances(&[]).is_empty());
        let single = [Waypoint::new(45.0, 5.0, "only")];
        assert!(leg_distances(&single).is_empty());
        assert_eq!(total_distance_miles(&leg_distances(&single)), 0.0);
    }

    #[test]
    fn test_total_distance_sums_legs() {
        let trip = [
            Waypoint::new(SAN_FRANCISCO.lat, SAN_FRANCISCO.lon, "San Francisco"),
            Waypoint::new(37.0058, -121.5669, "Gilroy"),
            Waypoint::new(LOS_ANGELES.lat, LOS_ANGELES.lon, "Los Angeles"),
        ];
        let legs = leg_distances(&trip);
        assert_eq!(legs.len(), 2);
        assert_eq!(total_distance_miles(&legs), legs[0] + legs[1]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(lat, lon)| Coordinate { lat, lon })
        }

        proptest! {
            #[test]
            fn prop_haversine_non_negative(a in valid_coord(), b in valid_coord()) {
                prop_assert!(haversine_miles(a, b) >= 0.0);
            }

            #[test]
            fn prop_haversine_symmetric(a in valid_coord(), b in valid_coord()) {
                prop_assert_eq!(haversine_miles(a, b), haversine_miles(b, a));
            }

            #[test]
            fn prop_haversine_same_point_is_zero(coord in valid_coord()) {
                prop_assert_eq!(haversine_miles(coord, coord), 0.0);
            }

            #[test]
            fn prop_haversine_bounded_by_half_circumference(
                a in valid_coord(),
                b in valid_coord()
            ) {
                let max_distance = (std::f64::consts::PI * EARTH_RADIUS_MILES).round();
                prop_assert!(haversine_miles(a, b) <= max_distance);
            }

            #[test]
            fn prop_total_distance_additive(
                path1 in prop::collection::vec(valid_coord(), 2..5),
                path2 in prop::collection::vec(valid_coord(), 2..5)
            ) {
                let to_waypoints = |coords: &[Coordinate]| -> Vec<Waypoint> {
                    coords.iter().map(|c| Waypoint::new(c.lat, c.lon, "p")).collect()
                };
                let first = to_waypoints(&path1);
                let second = to_waypoints(&path2);

                let mut combined = first.clone();
                combined.extend_from_slice(&second);

                let connection = haversine_miles(*path1.last().unwrap(), path2[0]);
                let total = |points: &[Waypoint]| total_distance_miles(&leg_distances(points));
                let expected = total(&first) + connection + total(&second);
                prop_assert_eq!(total(&combined), expected);
            }
        }
    }
}
