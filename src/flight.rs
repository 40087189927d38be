//! Flight legs between airports or arbitrary coordinates.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use nightflight_airports::{AirportDirectory, AirportError};
use nightflight_core::geo::{self, Nvec};
use nightflight_night::{NightError, NightIntegrator, checked_nvec};
use nightflight_sun::SunOracle;

/// Timestamp layouts accepted for takeoff and landing (UTC).
pub const INSTANT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Layout used when writing instants back out.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error)]
pub enum FlightError {
    #[error("airport lookup failed: {0}")]
    Airport(#[from] AirportError),
    #[error("night calculation failed: {0}")]
    Night(#[from] NightError),
    #[error("invalid timestamp `{0}` (expected YYYY-MM-DD HH:MM)")]
    InvalidInstant(String),
    #[error("invalid endpoint `{0}` (expected an airport code or `lat,lon`)")]
    InvalidEndpoint(String),
}

/// Departure or arrival point of a leg.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// Airport code resolved through the [`AirportDirectory`].
    Airport(String),
    /// Latitude/longitude in degrees.
    Position { lat: f64, lon: f64 },
}

impl Endpoint {
    /// Resolve to a direction vector.
    pub fn resolve(&self, directory: &AirportDirectory) -> Result<Nvec, FlightError> {
        match self {
            Endpoint::Airport(code) => Ok(directory.lookup(code)?),
            Endpoint::Position { lat, lon } => Ok(checked_nvec(*lat, *lon)?),
        }
    }
}

impl FromStr for Endpoint {
    type Err = FlightError;

    /// `BRS` or `51.38,-2.72`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((lat, lon)) = trimmed.split_once(',') {
            let lat = lat.trim().parse::<f64>();
            let lon = lon.trim().parse::<f64>();
            return match (lat, lon) {
                (Ok(lat), Ok(lon)) if geo::valid_lat_long(lat, lon) => {
                    Ok(Endpoint::Position { lat, lon })
                }
                _ => Err(FlightError::InvalidEndpoint(s.to_string())),
            };
        }
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FlightError::InvalidEndpoint(s.to_string()));
        }
        Ok(Endpoint::Airport(trimmed.to_ascii_uppercase()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Airport(code) => write!(f, "{code}"),
            Endpoint::Position { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}

/// Parse a UTC timestamp in one of [`INSTANT_FORMATS`].
pub fn parse_instant(s: &str) -> Result<NaiveDateTime, FlightError> {
    let trimmed = s.trim();
    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| FlightError::InvalidInstant(s.to_string()))
}

/// One flight from takeoff (`off`) to landing (`on`).
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLeg {
    pub from: Endpoint,
    pub to: Endpoint,
    pub off: NaiveDateTime,
    pub on: NaiveDateTime,
}

impl FlightLeg {
    /// Whole minutes between takeoff and landing.
    pub fn block_minutes(&self) -> i64 {
        (self.on - self.off).num_minutes()
    }

    /// Night minutes flown on this leg.
    pub fn night_minutes<O: SunOracle>(
        &self,
        directory: &AirportDirectory,
        integrator: &NightIntegrator<O>,
    ) -> Result<u32, FlightError> {
        let from = self.from.resolve(directory)?;
        let to = self.to.resolve(directory)?;
        Ok(integrator.night_duration(&from, &to, self.off, self.on)?)
    }
}

/// Row of a logbook input CSV (`from,to,off,on`).
#[derive(Debug, Clone, Deserialize)]
pub struct LegRecord {
    pub from: String,
    pub to: String,
    pub off: String,
    pub on: String,
}

impl TryFrom<LegRecord> for FlightLeg {
    type Error = FlightError;

    fn try_from(value: LegRecord) -> Result<Self, Self::Error> {
        Ok(FlightLeg {
            from: value.from.parse()?,
            to: value.to.parse()?,
            off: parse_instant(&value.off)?,
            on: parse_instant(&value.on)?,
        })
    }
}
