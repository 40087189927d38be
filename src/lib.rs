//! Night flying time along great-circle routes for pilot logbooks.
//!
//! The workspace crates are re-exported here so binaries and integration tests
//! depend on a single facade. [`flight`] resolves airport codes or coordinates
//! into route endpoints and runs the night integrator over a flight leg.

pub mod flight;

pub use nightflight_airports as airports;
pub use nightflight_config as config;
pub use nightflight_export as export;
pub use nightflight_geodesic as geodesic;
pub use nightflight_night as night;
pub use nightflight_sun as sun;

pub use nightflight_core::{constants, geo, units, vector};
pub use nightflight_night::{NightError, NightIntegrator, night_duration};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
