use std::io::Write;

use clap::{Parser, ValueEnum};
use pluggist::{
    config::{EstimatorConfig, parse_departure},
    gpx_export::write_trip_gpx,
    models::{ClockTime, PlanTripRequest},
    planner::TripPlanner,
    summary::render_itinerary,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Gpx,
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Plan an EV road trip with estimated charging stops"
)]
struct Args {
    /// Starting city, e.g. "San Francisco, CA"
    #[arg(long)]
    from: String,

    /// Destination city
    #[arg(long)]
    to: String,

    /// Vehicle model id (e.g. tesla_model_3) or "custom"
    #[arg(long)]
    vehicle: String,

    /// Range in miles, required with --vehicle custom
    #[arg(long)]
    custom_range: Option<f64>,

    /// Average driving speed in mph
    #[arg(long)]
    speed: Option<f64>,

    /// Battery percent to charge to at every stop
    #[arg(long)]
    charge_target: Option<u8>,

    /// Departure time as HH:MM
    #[arg(long)]
    departure: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl Args {
    fn estimator_config(&self) -> Result<EstimatorConfig, Box<dyn std::error::Error>> {
        let mut config = EstimatorConfig::from_env()?;
        if let Some(speed) = self.speed {
            config.average_speed_mph = speed;
        }
        if let Some(target) = self.charge_target {
            config.charge_target_percent = target;
        }
        if let Some(departure) = &self.departure {
            config.departure = parse_departure(departure)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = args.estimator_config()?;
    let planner = TripPlanner::with_city_directory(config);

    let plan = planner.plan(&PlanTripRequest {
        start: args.from.clone(),
        destination: args.to.clone(),
        vehicle_id: args.vehicle.clone(),
        custom_range_miles: args.custom_range,
    })?;

    match args.format {
        OutputFormat::Text => {
            let departure = ClockTime::from_minutes(config.departure_minutes());
            print!("{}", render_itinerary(&plan, departure));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Gpx => {
            let xml = write_trip_gpx(&plan.waypoints)?;
            std::io::stdout().write_all(&xml)?;
        }
    }

    Ok(())
}
