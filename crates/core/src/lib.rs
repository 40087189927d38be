//! Core constants, vector helpers, and coordinate conversion shared across the nightflight workspace.

/// Constants used by the night-flying calculation.
pub mod constants {
    /// Seconds per minute.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Tolerance applied when checking that a direction vector has unit length.
    pub const UNIT_TOLERANCE: f64 = 1e-6;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::SECONDS_PER_MINUTE;

    /// Convert milliseconds to fractional minutes.
    #[inline]
    pub fn ms_to_minutes(ms: i64) -> f64 {
        ms as f64 / (1_000.0 * SECONDS_PER_MINUTE)
    }

    /// Convert fractional minutes to whole milliseconds, rounding to nearest.
    #[inline]
    pub fn minutes_to_ms(minutes: f64) -> i64 {
        (minutes * 1_000.0 * SECONDS_PER_MINUTE).round() as i64
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in Earth-centred, Earth-fixed axes.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Divide every component by `magnitude`.
    ///
    /// Callers must guard against a zero magnitude.
    #[inline]
    pub fn div(v: &Vector3, magnitude: f64) -> Vector3 {
        [v[0] / magnitude, v[1] / magnitude, v[2] / magnitude]
    }
}

/// Conversion between geographic coordinates and unit-sphere direction vectors.
///
/// Axes: x = cos(lat)·cos(lon), y = cos(lat)·sin(lon), z = sin(lat).
pub mod geo {
    use super::constants::UNIT_TOLERANCE;
    use super::vector::{self, Vector3};

    /// Unit direction vector ("nvec") describing a point on the Earth's surface.
    pub type Nvec = Vector3;

    pub const NORTH_POLE: Nvec = [0.0, 0.0, 1.0];
    pub const SOUTH_POLE: Nvec = [0.0, 0.0, -1.0];

    /// Convert latitude/longitude in degrees to an nvec.
    pub fn to_nvec(lat_deg: f64, lon_deg: f64) -> Nvec {
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    /// Convert an nvec back to (latitude, longitude) in degrees.
    ///
    /// Uses `atan2` for both angles so quadrants and the poles resolve cleanly;
    /// a pole maps to longitude 0.
    pub fn to_lat_long(nvec: &Nvec) -> (f64, f64) {
        let lat = nvec[2].atan2(nvec[0].hypot(nvec[1]));
        let lon = nvec[1].atan2(nvec[0]);
        (lat.to_degrees(), lon.to_degrees())
    }

    /// True when the coordinates are finite and inside ±90° / ±180°.
    pub fn valid_lat_long(lat_deg: f64, lon_deg: f64) -> bool {
        lat_deg.is_finite()
            && lon_deg.is_finite()
            && (-90.0..=90.0).contains(&lat_deg)
            && (-180.0..=180.0).contains(&lon_deg)
    }

    /// True when every component is finite and the magnitude is within `tolerance` of one.
    pub fn is_unit(nvec: &Nvec, tolerance: f64) -> bool {
        nvec.iter().all(|c| c.is_finite()) && (vector::norm(nvec) - 1.0).abs() <= tolerance
    }

    /// [`is_unit`] with the workspace default tolerance.
    pub fn is_valid_nvec(nvec: &Nvec) -> bool {
        is_unit(nvec, UNIT_TOLERANCE)
    }

    /// Great-circle angle between two nvecs in radians.
    pub fn angle_between(a: &Nvec, b: &Nvec) -> f64 {
        let cross = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        vector::norm(&cross).atan2(vector::dot(a, b))
    }
}
