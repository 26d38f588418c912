pub mod assistant;
pub mod config;
pub mod distance;
pub mod error;
pub mod estimator;
pub mod gpx_export;
pub mod map_view;
pub mod models;
pub mod places;
pub mod planner;
pub mod stations;
pub mod summary;
pub mod vehicles;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};

use crate::assistant::{AssistantError, ChatRequest, ChatResponse, ServiceStatus};
use crate::error::PlanError;
use crate::estimator::estimate_trip;
use crate::models::{ApiError, EstimateRequest, PlanTripRequest, TripEstimate, TripPlan, VehicleListing};
use crate::places::CityDirectory;
use crate::planner::TripPlanner;
use crate::stations::{Station, StationCatalog, StationPage, StationQuery};

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub stations: Arc<StationCatalog>,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/trip/plan", post(plan_trip_handler))
        .route("/api/trip/estimate", post(estimate_handler))
        .route("/api/vehicles", get(vehicles_handler))
        .route("/api/cities", get(cities_handler))
        .route("/api/stations", get(stations_handler))
        .route("/api/stations/:id", get(station_handler))
        .route("/api/chargepal", post(chat_handler).get(chat_status_handler))
        .layer(cors)
        .with_state(state)
}

async fn plan_trip_handler(
    State(state): State<AppState>,
    Json(req): Json<PlanTripRequest>,
) -> ApiResult<TripPlan> {
    tracing::info!(
        "Trip request: {:?} -> {:?} ({})",
        req.start,
        req.destination,
        req.vehicle_id
    );
    state.planner.plan(&req).map(Json).map_err(plan_error)
}

async fn estimate_handler(
    State(state): State<AppState>,
    Json(req): Json<EstimateRequest>,
) -> ApiResult<TripEstimate> {
    estimate_trip(&req.waypoints, &req.vehicle, state.planner.config())
        .map(Json)
        .map_err(plan_error)
}

async fn vehicles_handler() -> Json<Vec<VehicleListing>> {
    Json(vehicles::listings())
}

async fn cities_handler() -> Json<Vec<String>> {
    Json(
        CityDirectory
            .cities()
            .iter()
            .map(|c| c.name.to_string())
            .collect(),
    )
}

async fn stations_handler(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> Json<StationPage> {
    let page = state.stations.search(&query);
    tracing::debug!("station search matched {} of {}", page.total, state.stations.len());
    Json(page)
}

async fn station_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Station> {
    state.stations.get(&id).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                message: format!("Station with ID {id} not found"),
            }),
        )
    })
}

async fn chat_handler(Json(req): Json<ChatRequest>) -> ApiResult<ChatResponse> {
    assistant::respond(&req, &mut rand::rng(), Utc::now())
        .map(Json)
        .map_err(assistant_error)
}

async fn chat_status_handler() -> Json<ServiceStatus> {
    Json(assistant::status())
}

/// Convert PlanError to API error response
fn plan_error(err: PlanError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        PlanError::Gpx(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PlanError::UnknownVehicle(_) | PlanError::UnknownPlace(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    if status.is_server_error() {
        tracing::error!("trip planning failed: {err}");
    } else {
        tracing::warn!("rejected trip request: {err}");
    }

    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}

fn assistant_error(err: AssistantError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
