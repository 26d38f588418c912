use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("a trip needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),
    #[error("vehicle range must be a positive number of miles, got {0}")]
    InvalidRange(f64),
    #[error("waypoint '{label}' has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinate { label: String, lat: f64, lon: f64 },
    #[error("please select a vehicle model")]
    MissingVehicle,
    #[error("please enter a custom range for your vehicle")]
    MissingCustomRange,
    #[error("unknown vehicle model '{0}'")]
    UnknownVehicle(String),
    #[error("unknown place '{0}'")]
    UnknownPlace(String),
    #[error("please enter both starting point and destination")]
    EmptyLocation,
    #[error("start and destination are the same place: {0}")]
    SameEndpoints(String),
    #[error("trip needs more than {max} charging stops at this range, at least {needed}")]
    TooManyStops { needed: usize, max: usize },
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}
