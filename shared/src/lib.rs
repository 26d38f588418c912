use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

/// A point in an ordered trip: the first is the start, the last the
/// destination, everything in between is a charging stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            label: label.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub model_id: String,
    pub range_miles: f64,
}

/// Wall-clock time of day. `day_offset` counts midnights crossed since departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub day_offset: u32,
}

impl ClockTime {
    pub fn from_minutes(total_minutes: u32) -> Self {
        Self {
            hour: (total_minutes / 60) % 24,
            minute: total_minutes % 60,
            day_offset: total_minutes / (24 * 60),
        }
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelTime {
    pub hours: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingStopEstimate {
    pub label: String,
    pub leg_distance_miles: f64,
    pub battery_percent_at_arrival: u8,
    pub charge_target_percent: u8,
    pub charging_minutes: f64,
    pub arrival: ClockTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub total_distance_miles: f64,
    pub total_travel_time: TravelTime,
    pub stop_count: usize,
    pub final_battery_percent: u8,
    pub destination_arrival: ClockTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEstimate {
    pub legs_miles: Vec<f64>,
    pub stops: Vec<ChargingStopEstimate>,
    pub summary: TripSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub waypoints: Vec<Waypoint>,
    pub vehicle: VehicleProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTripRequest {
    pub start: String,
    pub destination: String,
    pub vehicle_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_range_miles: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedVehicle {
    pub model_id: String,
    pub name: String,
    pub range_miles: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub start: String,
    pub destination: String,
    pub vehicle: PlannedVehicle,
    pub waypoints: Vec<Waypoint>,
    pub stops: Vec<ChargingStopEstimate>,
    pub summary: TripSummary,
    pub map: MapView,
    pub gpx_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleListing {
    pub id: String,
    pub manufacturer: String,
    pub name: String,
    pub range_miles: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
