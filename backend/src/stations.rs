// Module stations - read-only charging station catalog
// Loaded once at startup from a JSON export; search runs in memory.

use std::{
    collections::HashSet,
    fs::File,
    io::{self, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{distance::haversine_miles, models::Coordinate};

const DEFAULT_RADIUS_MILES: f64 = 10.0;
const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read station file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid station data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate station id {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub connector_type: String,
    pub power_kw: f64,
    pub quantity: u32,
    pub price_per_kwh: f64,
    pub is_operational: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub network_id: String,
    pub network_name: String,
    pub is_verified: bool,
    pub connectors: Vec<Connector>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
}

impl Station {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

/// Query string for `GET /api/stations`. List filters are comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub connector_types: Option<String>,
    pub amenities: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationPage {
    pub stations: Vec<Station>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

impl StationCatalog {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let stations: Vec<Station> = serde_json::from_reader(reader)?;
        Self::from_stations(stations)
    }

    pub fn from_stations(stations: Vec<Station>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for station in &stations {
            if !seen.insert(station.id.as_str()) {
                return Err(CatalogError::DuplicateId(station.id.clone()));
            }
        }
        Ok(Self { stations })
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Filter, then paginate. `total` counts every match before pagination.
    ///
    /// A radius filter only applies when both `lat` and `lng` are given.
    pub fn search(&self, query: &StationQuery) -> StationPage {
        let connector_types = split_list(query.connector_types.as_deref());
        let amenities = split_list(query.amenities.as_deref());
        let center = match (query.lat, query.lng) {
            (Some(lat), Some(lon)) => Some(Coordinate { lat, lon }),
            _ => None,
        };
        let radius = query.radius.unwrap_or(DEFAULT_RADIUS_MILES);

        let matches: Vec<&Station> = self
            .stations
            .iter()
            .filter(|s| match center {
                Some(center) => haversine_miles(center, s.coordinate()) <= radius,
                None => true,
            })
            .filter(|s| {
                connector_types.is_empty()
                    || s.connectors
                        .iter()
                        .any(|c| connector_types.contains(&c.connector_type.as_str()))
            })
            .filter(|s| amenities.iter().all(|a| s.amenities.iter().any(|have| have == a)))
            .collect();

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = query.offset.unwrap_or(0);
        let total = matches.len();
        let stations = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        StationPage {
            stations,
            total,
            limit,
            offset,
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<&str> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    })
    .unwrap_or_default()
}
