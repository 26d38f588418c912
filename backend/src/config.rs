use std::{net::SocketAddr, path::PathBuf};

use chrono::{NaiveTime, Timelike};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STATIONS_PATH: &str = "backend/data/stations.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },
    #[error("{0}")]
    OutOfRange(String),
}

/// Assumptions behind the charging-stop estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    pub average_speed_mph: f64,
    /// Every stop charges up to this battery level.
    pub charge_target_percent: u8,
    pub minutes_per_percent: f64,
    pub min_charging_minutes: f64,
    /// Flat charging allowance per stop used for the total travel time.
    pub charging_hours_per_stop: f64,
    pub departure: NaiveTime,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            average_speed_mph: 60.0,
            charge_target_percent: 80,
            minutes_per_percent: 0.5,
            min_charging_minutes: 10.0,
            charging_hours_per_stop: 0.5,
            departure: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        }
    }
}

impl EstimatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from `TRIP_*` variables resolved through `lookup`,
    /// keeping defaults for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = parse_var(&lookup, "TRIP_AVERAGE_SPEED_MPH")? {
            config.average_speed_mph = value;
        }
        if let Some(value) = parse_var(&lookup, "TRIP_CHARGE_TARGET_PERCENT")? {
            config.charge_target_percent = value;
        }
        if let Some(value) = parse_var(&lookup, "TRIP_MINUTES_PER_PERCENT")? {
            config.minutes_per_percent = value;
        }
        if let Some(value) = parse_var(&lookup, "TRIP_MIN_CHARGING_MINUTES")? {
            config.min_charging_minutes = value;
        }
        if let Some(value) = parse_var(&lookup, "TRIP_CHARGING_HOURS_PER_STOP")? {
            config.charging_hours_per_stop = value;
        }
        if let Some(raw) = lookup("TRIP_DEPARTURE") {
            config.departure = parse_departure(&raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.average_speed_mph.is_finite() && self.average_speed_mph > 0.0) {
            return Err(ConfigError::OutOfRange(format!(
                "average speed must be positive, got {}",
                self.average_speed_mph
            )));
        }
        if !(1..=100).contains(&self.charge_target_percent) {
            return Err(ConfigError::OutOfRange(format!(
                "charge target must be between 1 and 100 percent, got {}",
                self.charge_target_percent
            )));
        }
        for (name, value) in [
            ("minutes per percent", self.minutes_per_percent),
            ("minimum charging minutes", self.min_charging_minutes),
            ("charging hours per stop", self.charging_hours_per_stop),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn departure_minutes(&self) -> u32 {
        self.departure.hour() * 60 + self.departure.minute()
    }
}

pub fn parse_departure(raw: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| ConfigError::InvalidValue {
        name: "TRIP_DEPARTURE",
        value: raw.to_string(),
    })
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub stations_path: PathBuf,
    pub estimator: EstimatorConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("PLUGGIST_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError::InvalidValue {
            name: "PLUGGIST_ADDR",
            value: raw_addr.clone(),
        })?;
        let stations_path = lookup("STATIONS_JSON")
            .unwrap_or_else(|| DEFAULT_STATIONS_PATH.to_string())
            .into();
        let estimator = EstimatorConfig::from_lookup(&lookup)?;

        Ok(Self {
            bind_addr,
            stations_path,
            estimator,
        })
    }
}
