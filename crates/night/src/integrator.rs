//! Adaptive integration of night time along a great-circle route.
//!
//! The route is sampled at roughly `section_length_minutes` intervals. Pairs
//! of samples that disagree about day/night are re-sampled with half the
//! section length until the terminal section length is reached, where the
//! interval is split by `transition_night_fraction`.

use chrono::NaiveDateTime;
use nightflight_config::NightRules;
use nightflight_core::geo::{self, Nvec};
use nightflight_core::units;
use nightflight_geodesic::bisect;
use nightflight_sun::{NoaaSun, SunOracle};
use tracing::{debug, trace};

use crate::NightError;
use crate::predicate::NightPredicate;

/// Keeps the sample buffer bounded (2^21 + 1 points) for absurdly long intervals.
pub const MAX_BISECTION_DEPTH: u32 = 20;

/// Initial bisection depth for a flight of `duration_minutes`.
///
/// Chosen so the `2^(depth + 1)` sub-intervals are no longer than
/// `section_minutes`, except that short flights still get depth 0.
pub fn bisection_depth(duration_minutes: f64, section_minutes: f64) -> u32 {
    let sections = duration_minutes / section_minutes;
    if sections.is_nan() || sections <= 1.0 {
        return 0;
    }
    let depth = sections.log2().ceil() as i64 - 1;
    depth.clamp(0, MAX_BISECTION_DEPTH as i64) as u32
}

/// Night minutes for a flight using the NOAA sun model and default rules.
pub fn night_duration(
    from: &Nvec,
    to: &Nvec,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<u32, NightError> {
    NightIntegrator::default().night_duration(from, to, start, end)
}

/// Computes night time along routes for a given sun oracle and rule set.
#[derive(Debug, Clone)]
pub struct NightIntegrator<O> {
    predicate: NightPredicate<O>,
    rules: NightRules,
}

impl Default for NightIntegrator<NoaaSun> {
    fn default() -> Self {
        let rules = NightRules::default();
        Self {
            predicate: NightPredicate::new(NoaaSun::default(), &rules),
            rules,
        }
    }
}

impl<O: SunOracle> NightIntegrator<O> {
    pub fn new(oracle: O, rules: NightRules) -> Result<Self, NightError> {
        rules.validate()?;
        Ok(Self {
            predicate: NightPredicate::new(oracle, &rules),
            rules,
        })
    }

    /// Whole minutes of night between `start` and `end` flying from `from` to `to`.
    pub fn night_duration(
        &self,
        from: &Nvec,
        to: &Nvec,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<u32, NightError> {
        self.night_duration_with_section(from, to, start, end, self.rules.section_length_minutes)
    }

    /// [`Self::night_duration`] with an explicit initial section length.
    pub fn night_duration_with_section(
        &self,
        from: &Nvec,
        to: &Nvec,
        start: NaiveDateTime,
        end: NaiveDateTime,
        section_minutes: f64,
    ) -> Result<u32, NightError> {
        let minutes = self.night_minutes(from, to, start, end, section_minutes)?;
        Ok(minutes.round() as u32)
    }

    /// Unrounded night minutes, after validating the caller's input.
    pub fn night_minutes(
        &self,
        from: &Nvec,
        to: &Nvec,
        start: NaiveDateTime,
        end: NaiveDateTime,
        section_minutes: f64,
    ) -> Result<f64, NightError> {
        if start >= end {
            return Err(NightError::EmptyInterval { start, end });
        }
        if !section_minutes.is_finite() || section_minutes <= 0.0 {
            return Err(NightError::InvalidSectionLength(section_minutes));
        }
        for (which, nvec) in [("departure", from), ("arrival", to)] {
            if !geo::is_valid_nvec(nvec) {
                return Err(NightError::InvalidPoint { which, nvec: *nvec });
            }
        }

        let minutes = self.accumulate(from, to, start, end, section_minutes);
        debug!(%start, %end, night_minutes = minutes, "night duration computed");
        Ok(minutes)
    }

    fn accumulate(
        &self,
        from: &Nvec,
        to: &Nvec,
        start: NaiveDateTime,
        end: NaiveDateTime,
        section_minutes: f64,
    ) -> f64 {
        let span = end - start;
        let span_minutes = units::ms_to_minutes(span.num_milliseconds());
        let depth = bisection_depth(span_minutes, section_minutes);
        let points = bisect(from, to, depth);
        let segments = (points.len() - 1) as i32;
        let segment_minutes = span_minutes / segments as f64;
        trace!(depth, samples = points.len(), section_minutes, "sampling route");

        let instant_at = |i: i32| -> NaiveDateTime {
            if i == segments {
                end
            } else {
                start + span * i / segments
            }
        };

        let mut night = 0.0;
        let mut last_point = &points[0];
        let mut last_instant = start;
        let mut last_is_night = self.predicate.is_night(last_point, last_instant);
        for (i, point) in points.iter().enumerate().skip(1) {
            let instant = instant_at(i as i32);
            let is_night = self.predicate.is_night(point, instant);
            if is_night != last_is_night {
                if section_minutes > self.rules.terminal_section_minutes {
                    trace!(%last_instant, %instant, "refining day/night transition");
                    night += self.accumulate(
                        last_point,
                        point,
                        last_instant,
                        instant,
                        section_minutes / 2.0,
                    );
                } else {
                    night += segment_minutes * self.rules.transition_night_fraction;
                }
            } else if is_night {
                night += segment_minutes;
            }
            last_point = point;
            last_instant = instant;
            last_is_night = is_night;
        }
        night
    }
}
