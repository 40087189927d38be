//! Sunrise/sunset oracle interface consumed by the night predicate.
//!
//! The night calculation only depends on [`SunOracle`]; [`NoaaSun`] is the
//! bundled implementation built on the NOAA solar-position equations.

use chrono::{NaiveDate, NaiveDateTime};

pub mod noaa;

/// Sun events for one location on one UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunTimes {
    /// Sunrise and sunset that both fall on the requested date.
    ///
    /// Either order is possible: far from Greenwich the local day straddles
    /// UTC midnight and the date's sunset precedes its sunrise.
    Events {
        sunrise: NaiveDateTime,
        sunset: NaiveDateTime,
    },
    /// The sun neither rises nor sets (polar day or polar night).
    NoEvent,
}

/// Source of sunrise/sunset instants for a latitude/longitude and UTC date.
pub trait SunOracle {
    fn sun_times(&self, lat_deg: f64, lon_deg: f64, date: NaiveDate) -> SunTimes;
}

impl<T: SunOracle + ?Sized> SunOracle for &T {
    fn sun_times(&self, lat_deg: f64, lon_deg: f64, date: NaiveDate) -> SunTimes {
        (**self).sun_times(lat_deg, lon_deg, date)
    }
}

/// Zenith angle of the sun's centre at apparent sunrise/sunset: 90° plus
/// 34' of refraction and 16' of solar semi-diameter.
pub const OFFICIAL_ZENITH_DEG: f64 = 90.833;

/// Oracle backed by the NOAA solar equations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoaaSun {
    pub zenith_deg: f64,
}

impl Default for NoaaSun {
    fn default() -> Self {
        Self {
            zenith_deg: OFFICIAL_ZENITH_DEG,
        }
    }
}

impl SunOracle for NoaaSun {
    fn sun_times(&self, lat_deg: f64, lon_deg: f64, date: NaiveDate) -> SunTimes {
        let sunrise = noaa::event_on_date(lat_deg, lon_deg, date, noaa::Event::Rise, self.zenith_deg);
        let sunset = noaa::event_on_date(lat_deg, lon_deg, date, noaa::Event::Set, self.zenith_deg);
        match (sunrise, sunset) {
            (Some(sunrise), Some(sunset)) => SunTimes::Events { sunrise, sunset },
            _ => SunTimes::NoEvent,
        }
    }
}
