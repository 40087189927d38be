//! Day/night classification of a single route sample.

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use nightflight_config::NightRules;
use nightflight_core::geo::{self, Nvec};
use nightflight_core::units;
use nightflight_sun::{SunOracle, SunTimes};

/// Classifies (position, instant) pairs as regulatory night or day.
#[derive(Debug, Clone)]
pub struct NightPredicate<O> {
    oracle: O,
    margin: TimeDelta,
}

impl<O: SunOracle> NightPredicate<O> {
    pub fn new(oracle: O, rules: &NightRules) -> Self {
        Self::with_margin(
            oracle,
            TimeDelta::milliseconds(units::minutes_to_ms(rules.margin_minutes)),
        )
    }

    pub fn with_margin(oracle: O, margin: TimeDelta) -> Self {
        Self { oracle, margin }
    }

    /// True when `instant` (UTC) is regulatory night directly below `nvec`.
    ///
    /// Day runs from `sunrise - margin` to `sunset + margin`. When the date's
    /// sunset precedes its sunrise the UTC day starts and ends in daylight, so
    /// night is the stretch between the two. Without any sunrise or sunset the
    /// hemisphere and month decide, see [`seasonal_night`].
    pub fn is_night(&self, nvec: &Nvec, instant: NaiveDateTime) -> bool {
        let (lat, lon) = geo::to_lat_long(nvec);
        match self.oracle.sun_times(lat, lon, instant.date()) {
            SunTimes::Events { sunrise, sunset } => {
                let light_from = sunrise - self.margin;
                let light_until = sunset + self.margin;
                if sunset > sunrise {
                    !(light_from <= instant && instant <= light_until)
                } else {
                    !(instant <= light_until || instant >= light_from)
                }
            }
            SunTimes::NoEvent => seasonal_night(nvec, instant.month()),
        }
    }
}

/// Polar fallback when the sun neither rises nor sets.
///
/// April to August is polar day in the northern hemisphere and October to
/// February in the southern one; anything else is taken as polar night.
pub fn seasonal_night(nvec: &Nvec, month: u32) -> bool {
    let northern_summer = nvec[2] > 0.0 && (4..=8).contains(&month);
    let southern_summer = nvec[2] < 0.0 && matches!(month, 10 | 11 | 12 | 1 | 2);
    !(northern_summer || southern_summer)
}
