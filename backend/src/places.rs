use crate::{
    distance::haversine_miles,
    error::PlanError,
    models::{Coordinate, Waypoint},
};

/// Trait for producing the ordered waypoints of a trip.
///
/// Abstracts place resolution and stop selection so the planner can run
/// against the built-in city directory, a real geocoding/routing service,
/// or a fixed list in tests.
///
/// # Contract
/// Implementations must return at least two waypoints, start first and
/// destination last, with charging stops in driving order in between.
pub trait WaypointProvider: Send + Sync {
    fn waypoints(
        &self,
        start: &str,
        destination: &str,
        range_miles: f64,
    ) -> Result<Vec<Waypoint>, PlanError>;
}

#[derive(Debug, Clone, Copy)]
pub struct City {
    pub name: &'static str,
    pub coord: Coordinate,
}

#[derive(Debug, Clone, Copy)]
struct Station {
    name: &'static str,
    coord: Coordinate,
}

struct Corridor {
    from: &'static str,
    to: &'static str,
    stations: &'static [Station],
}

const fn city(name: &'static str, lat: f64, lon: f64) -> City {
    City {
        name,
        coord: Coordinate { lat, lon },
    }
}

const fn station(name: &'static str, lat: f64, lon: f64) -> Station {
    Station {
        name,
        coord: Coordinate { lat, lon },
    }
}

static CITIES: &[City] = &[
    city("San Francisco, CA", 37.7749, -122.4194),
    city("Los Angeles, CA", 34.0522, -118.2437),
    city("New York, NY", 40.7128, -74.0060),
    city("Chicago, IL", 41.8781, -87.6298),
    city("Houston, TX", 29.7604, -95.3698),
    city("Phoenix, AZ", 33.4484, -112.0740),
    city("Seattle, WA", 47.6062, -122.3321),
    city("Denver, CO", 39.7392, -104.9903),
    city("Dallas, TX", 32.7767, -96.7970),
    city("Miami, FL", 25.7617, -80.1918),
    city("Las Vegas, NV", 36.1699, -115.1398),
    city("Boston, MA", 42.3601, -71.0589),
    city("Portland, OR", 45.5152, -122.6784),
    city("Austin, TX", 30.2672, -97.7431),
    city("San Diego, CA", 32.7157, -117.1611),
    city("Nashville, TN", 36.1627, -86.7816),
    city("Atlanta, GA", 33.7490, -84.3880),
];

static CORRIDORS: &[Corridor] = &[
    Corridor {
        from: "San Francisco, CA",
        to: "Los Angeles, CA",
        stations: &[
            station("Tesla Supercharger - Gilroy, CA", 37.0058, -121.5669),
            station("Tesla Supercharger - Tejon Ranch, CA", 35.9774, -118.8860),
        ],
    },
    Corridor {
        from: "New York, NY",
        to: "Chicago, IL",
        stations: &[
            station("Tesla Supercharger - Cleveland, OH", 41.0339, -80.7598),
            station("EVgo Fast Charging - South Bend, IN", 41.7128, -86.2486),
        ],
    },
    Corridor {
        from: "Seattle, WA",
        to: "Denver, CO",
        stations: &[
            station("Electrify America - The Dalles, OR", 45.6387, -121.1253),
            station("ChargePoint - Idaho Falls, ID", 43.8041, -111.8169),
            station("Tesla Supercharger - Laramie, WY", 41.6005, -106.3890),
        ],
    },
];

const GENERATED_STOP_LABEL: &str = "Fast Charging Station";
/// Upper bound on generated stops for one trip.
pub const MAX_GENERATED_STOPS: usize = 100;

/// Demo geocoder over a fixed set of US cities with known charging corridors.
#[derive(Debug, Default, Clone, Copy)]
pub struct CityDirectory;

impl CityDirectory {
    pub fn cities(&self) -> &'static [City] {
        CITIES
    }

    /// Case-insensitive lookup by full name ("Denver, CO") or bare city name ("denver").
    pub fn find(&self, query: &str) -> Option<&'static City> {
        let query = query.trim();
        CITIES.iter().find(|c| {
            c.name.eq_ignore_ascii_case(query) || short_name(c.name).eq_ignore_ascii_case(query)
        })
    }

    fn corridor_stations(&self, from: &City, to: &City) -> Option<Vec<Station>> {
        CORRIDORS.iter().find_map(|corridor| {
            if corridor.from == from.name && corridor.to == to.name {
                Some(corridor.stations.to_vec())
            } else if corridor.from == to.name && corridor.to == from.name {
                Some(corridor.stations.iter().rev().copied().collect())
            } else {
                None
            }
        })
    }
}

impl WaypointProvider for CityDirectory {
    fn waypoints(
        &self,
        start: &str,
        destination: &str,
        range_miles: f64,
    ) -> Result<Vec<Waypoint>, PlanError> {
        let from = self
            .find(start)
            .ok_or_else(|| PlanError::UnknownPlace(start.trim().to_string()))?;
        let to = self
            .find(destination)
            .ok_or_else(|| PlanError::UnknownPlace(destination.trim().to_string()))?;
        if from.name == to.name {
            return Err(PlanError::SameEndpoints(from.name.to_string()));
        }

        let mut waypoints = vec![Waypoint::new(from.coord.lat, from.coord.lon, from.name)];
        match self.corridor_stations(from, to) {
            Some(stations) => {
                waypoints.extend(
                    stations
                        .iter()
                        .map(|s| Waypoint::new(s.coord.lat, s.coord.lon, s.name)),
                );
            }
            None => waypoints.extend(generated_stops(from.coord, to.coord, range_miles)?),
        }
        waypoints.push(Waypoint::new(to.coord.lat, to.coord.lon, to.name));

        tracing::debug!(
            "{} -> {}: {} charging stops",
            from.name,
            to.name,
            waypoints.len() - 2
        );
        Ok(waypoints)
    }
}

/// Evenly spaced stops along the straight line, just enough that no leg
/// is longer than the vehicle range.
///
/// Interpolating lat/lon is not the great circle, so the first guess of
/// `ceil(d / range) - 1` stops is measured and grown until every leg fits.
/// Fails with `TooManyStops` past `MAX_GENERATED_STOPS`.
fn generated_stops(
    from: Coordinate,
    to: Coordinate,
    range_miles: f64,
) -> Result<Vec<Waypoint>, PlanError> {
    let direct = haversine_miles(from, to);
    if direct <= range_miles {
        return Ok(Vec::new());
    }

    // `as` saturates, so a tiny range cannot wrap around here.
    let mut count = ((direct / range_miles).ceil() as usize).saturating_sub(1).max(1);
    loop {
        if count > MAX_GENERATED_STOPS {
            return Err(PlanError::TooManyStops {
                needed: count,
                max: MAX_GENERATED_STOPS,
            });
        }
        let stops = interpolated_stops(from, to, count);
        if legs_within_range(from, &stops, to, range_miles) {
            return Ok(stops);
        }
        count += 1;
    }
}

fn legs_within_range(
    from: Coordinate,
    stops: &[Waypoint],
    to: Coordinate,
    range_miles: f64,
) -> bool {
    let points: Vec<Coordinate> = std::iter::once(from)
        .chain(stops.iter().map(Waypoint::coordinate))
        .chain(std::iter::once(to))
        .collect();
    points
        .windows(2)
        .all(|pair| haversine_miles(pair[0], pair[1]) <= range_miles)
}

fn interpolated_stops(from: Coordinate, to: Coordinate, count: usize) -> Vec<Waypoint> {
    (1..=count)
        .map(|i| {
            let point = from.interpolate(to, i as f64 / (count + 1) as f64);
            let label = if count == 1 {
                GENERATED_STOP_LABEL.to_string()
            } else {
                format!("{GENERATED_STOP_LABEL} {i}")
            };
            Waypoint::new(point.lat, point.lon, label)
        })
        .collect()
}

fn short_name(name: &str) -> &str {
    name.split(',').next().unwrap_or(name).trim()
}
