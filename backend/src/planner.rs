use std::sync::Arc;

use crate::{
    config::EstimatorConfig,
    error::PlanError,
    estimator::estimate_trip,
    gpx_export::encode_trip_as_gpx,
    map_view::map_view,
    models::{PlanTripRequest, PlannedVehicle, TripPlan},
    places::{CityDirectory, WaypointProvider},
    vehicles::{display_name, resolve_profile},
};

/// Turns a "plan trip" request into a complete itinerary.
///
/// Holds no per-request state: every call resolves the vehicle, fetches
/// waypoints and runs the estimator from scratch.
#[derive(Clone)]
pub struct TripPlanner {
    provider: Arc<dyn WaypointProvider>,
    config: EstimatorConfig,
}

impl TripPlanner {
    pub fn new(provider: Arc<dyn WaypointProvider>, config: EstimatorConfig) -> Self {
        Self { provider, config }
    }

    pub fn with_city_directory(config: EstimatorConfig) -> Self {
        Self::new(Arc::new(CityDirectory), config)
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn plan(&self, req: &PlanTripRequest) -> Result<TripPlan, PlanError> {
        let start = req.start.trim();
        let destination = req.destination.trim();
        if start.is_empty() || destination.is_empty() {
            return Err(PlanError::EmptyLocation);
        }

        let vehicle = resolve_profile(&req.vehicle_id, req.custom_range_miles)?;
        let waypoints = self
            .provider
            .waypoints(start, destination, vehicle.range_miles)?;
        if waypoints.len() < 2 {
            return Err(PlanError::TooFewWaypoints(waypoints.len()));
        }

        let estimate = estimate_trip(&waypoints, &vehicle, &self.config)?;
        let map = map_view(&waypoints);
        let gpx_base64 = encode_trip_as_gpx(&waypoints)?;

        tracing::info!(
            "planned {} -> {} for {}: {} miles, {} stops",
            start,
            destination,
            vehicle.model_id,
            estimate.summary.total_distance_miles,
            estimate.summary.stop_count
        );

        Ok(TripPlan {
            start: start.to_string(),
            destination: destination.to_string(),
            vehicle: PlannedVehicle {
                name: display_name(&vehicle.model_id),
                model_id: vehicle.model_id,
                range_miles: vehicle.range_miles,
            },
            waypoints,
            stops: estimate.stops,
            summary: estimate.summary,
            map,
            gpx_base64,
        })
    }
}
