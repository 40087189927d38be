//! Night predicate and adaptive night-duration integrator.
//!
//! [`NightIntegrator`] walks a great-circle route sampled by the geodesic
//! bisector, classifies each sample with [`NightPredicate`], and refines the
//! sampling around day/night transitions.

pub mod integrator;
pub mod predicate;

use chrono::NaiveDateTime;
use nightflight_config::ConfigError;
use nightflight_core::geo::{self, Nvec};
use thiserror::Error;

pub use integrator::{MAX_BISECTION_DEPTH, NightIntegrator, bisection_depth, night_duration};
pub use predicate::{NightPredicate, seasonal_night};

/// Errors surfaced for invalid caller input.
///
/// Antipodal routes and days without sunrise or sunset are not errors; they
/// are resolved inside the bisector and the predicate.
#[derive(Debug, Error)]
pub enum NightError {
    #[error("flight must end after it starts (start {start}, end {end})")]
    EmptyInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("section length must be a positive number of minutes, got {0}")]
    InvalidSectionLength(f64),
    #[error("{which} point {nvec:?} is not a unit direction vector")]
    InvalidPoint { which: &'static str, nvec: Nvec },
    #[error("latitude/longitude ({lat}, {lon}) out of range")]
    InvalidCoordinates { lat: f64, lon: f64 },
    #[error("invalid night rules: {0}")]
    Rules(#[from] ConfigError),
}

/// Convert latitude/longitude to an nvec, rejecting out-of-range input.
pub fn checked_nvec(lat_deg: f64, lon_deg: f64) -> Result<Nvec, NightError> {
    if !geo::valid_lat_long(lat_deg, lon_deg) {
        return Err(NightError::InvalidCoordinates {
            lat: lat_deg,
            lon: lon_deg,
        });
    }
    Ok(geo::to_nvec(lat_deg, lon_deg))
}
