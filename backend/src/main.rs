use std::sync::Arc;

use pluggist::{
    AppState, config::ServerConfig, create_router, planner::TripPlanner, stations::StationCatalog,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pluggist=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let stations = StationCatalog::from_file(&config.stations_path)?;
    tracing::info!(
        "loaded {} stations from {}",
        stations.len(),
        config.stations_path.display()
    );
    tracing::info!("estimator assumptions: {:?}", config.estimator);

    let state = AppState {
        planner: Arc::new(TripPlanner::with_city_directory(config.estimator)),
        stations: Arc::new(stations),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("starting backend on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
