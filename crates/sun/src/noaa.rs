//! NOAA solar equations (Meeus, low precision) for sunrise and sunset.
//!
//! Accuracy is about a minute at mid latitudes for dates within a few
//! centuries of J2000, degrading close to the polar circles where the sun
//! grazes the horizon.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

const DEG: f64 = std::f64::consts::PI / 180.0;
const MINUTES_PER_DAY: f64 = 1_440.0;
/// Julian date of 0001-01-01T00:00 minus one day, so `num_days_from_ce` lines up.
const JD_CE_OFFSET: f64 = 1_721_424.5;
const REFINEMENT_PASSES: usize = 3;
const LAST_MS_OF_DAY: i64 = 86_399_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Rise,
    Set,
}

/// Julian date at 00:00 UTC of `date`.
pub fn julian_date(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64 + JD_CE_OFFSET
}

fn julian_century(jd: f64) -> f64 {
    (jd - 2_451_545.0) / 36_525.0
}

fn normalize_degrees(deg: f64) -> f64 {
    let d = deg % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

fn sun_mean_longitude(t: f64) -> f64 {
    normalize_degrees(280.46646 + t * (36_000.76983 + t * 0.0003032))
}

fn sun_mean_anomaly(t: f64) -> f64 {
    normalize_degrees(357.52911 + t * (35_999.05029 - t * 0.0001537))
}

fn earth_eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + t * 0.0000001267)
}

fn sun_equation_of_center(t: f64) -> f64 {
    let m = sun_mean_anomaly(t) * DEG;
    m.sin() * (1.914602 - t * (0.004817 + t * 0.000014))
        + (2.0 * m).sin() * (0.019993 - t * 0.000101)
        + (3.0 * m).sin() * 0.000289
}

fn sun_apparent_longitude(t: f64) -> f64 {
    let omega = 125.04 - 1934.136 * t;
    sun_mean_longitude(t) + sun_equation_of_center(t) - 0.00569 - 0.00478 * (omega * DEG).sin()
}

fn obliquity_corrected(t: f64) -> f64 {
    let mean = 23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0;
    let omega = 125.04 - 1934.136 * t;
    mean + 0.00256 * (omega * DEG).cos()
}

/// Solar declination in degrees.
pub fn declination(t: f64) -> f64 {
    let e = obliquity_corrected(t) * DEG;
    let lambda = sun_apparent_longitude(t) * DEG;
    (e.sin() * lambda.sin()).asin() / DEG
}

/// Equation of time in minutes.
pub fn equation_of_time(t: f64) -> f64 {
    let e = obliquity_corrected(t) * DEG;
    let l0 = sun_mean_longitude(t) * DEG;
    let ecc = earth_eccentricity(t);
    let m = sun_mean_anomaly(t) * DEG;
    let y = (e / 2.0).tan().powi(2);

    let eq = y * (2.0 * l0).sin() - 2.0 * ecc * m.sin()
        + 4.0 * ecc * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * ecc * ecc * (2.0 * m).sin();

    4.0 * eq / DEG
}

/// Minutes after 00:00 UTC of `date` at which the event occurs on the solar day
/// centred on that date's local noon. May fall outside `0..1440`.
///
/// Returns `None` when the sun does not cross `zenith_deg` that day.
pub fn event_minutes(
    lat_deg: f64,
    lon_deg: f64,
    date: NaiveDate,
    event: Event,
    zenith_deg: f64,
) -> Option<f64> {
    let jd0 = julian_date(date);
    let lat = lat_deg * DEG;
    let mut minutes = 720.0 - 4.0 * lon_deg;
    for _ in 0..REFINEMENT_PASSES {
        let t = julian_century(jd0 + minutes / MINUTES_PER_DAY);
        let decl = declination(t) * DEG;
        let cos_hour_angle =
            ((zenith_deg * DEG).cos() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());
        if !(-1.0..=1.0).contains(&cos_hour_angle) {
            return None;
        }
        let hour_angle = cos_hour_angle.acos() / DEG;
        let offset = match event {
            Event::Rise => lon_deg + hour_angle,
            Event::Set => lon_deg - hour_angle,
        };
        minutes = 720.0 - 4.0 * offset - equation_of_time(t);
    }
    Some(minutes)
}

/// Instant of the event that falls on the UTC calendar `date`.
///
/// Neighbouring solar days are consulted when the date's own event spills
/// across UTC midnight. `None` means the sun does not cross the horizon on the
/// solar day of `date`.
///
/// Near the polar circles the event can miss the date entirely while the sun
/// still crosses the horizon on the surrounding solar days, e.g. a sunset that
/// slips from 09:43 on one date to past midnight of the next. The instant is
/// then pinned to the date edge nearest the solar day's own event (00:00 or
/// 23:59:59.999), so the sun stays up, or down, for the rest of that date.
pub fn event_on_date(
    lat_deg: f64,
    lon_deg: f64,
    date: NaiveDate,
    event: Event,
    zenith_deg: f64,
) -> Option<NaiveDateTime> {
    let own = event_minutes(lat_deg, lon_deg, date, event, zenith_deg)?;
    let minutes = [0i64, -1, 1]
        .into_iter()
        .filter_map(|shift| {
            let minutes = if shift == 0 {
                own
            } else {
                let day = date.checked_add_signed(TimeDelta::days(shift))?;
                event_minutes(lat_deg, lon_deg, day, event, zenith_deg)?
            };
            Some(minutes + shift as f64 * MINUTES_PER_DAY)
        })
        .find(|m| (0.0..MINUTES_PER_DAY).contains(m))
        // No occurrence on this date; pin to the nearer edge.
        .unwrap_or_else(|| own.clamp(0.0, MINUTES_PER_DAY));

    let ms = ((minutes * 60_000.0).round() as i64).min(LAST_MS_OF_DAY);
    Some(date.and_time(NaiveTime::MIN) + TimeDelta::milliseconds(ms))
}
