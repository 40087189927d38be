//! Airport directory keyed by IATA code, built from OpenFlights `airports.dat`.
//!
//! The directory is immutable once built and can be shared by reference
//! between threads running independent night calculations.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use nightflight_core::geo::{self, Nvec};
use thiserror::Error;
use tracing::{info, warn};

/// Column positions in the OpenFlights `airports.dat` format.
pub mod fields {
    pub const IATA: usize = 4;
    pub const LATITUDE: usize = 6;
    pub const LONGITUDE: usize = 7;
}

/// Placeholder OpenFlights uses for a missing code.
pub const NULL_FIELD: &str = "\\N";

/// Airports missing from the OpenFlights snapshot, as (code, latitude, longitude).
pub const SUPPLEMENTARY_AIRPORTS: &[(&str, f64, f64)] = &[("BER", 52.36667, 13.50333)];

/// Errors surfaced while loading or querying the directory.
#[derive(Debug, Error)]
pub enum AirportError {
    #[error("failed to read airport data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse airport data: {0}")]
    Csv(#[from] csv::Error),
    #[error("airport '{0}' not found in directory")]
    Unknown(String),
}

/// Immutable mapping from airport code to unit direction vector.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: HashMap<String, Nvec>,
}

impl AirportDirectory {
    /// Build a directory from `(code, latitude, longitude)` entries.
    ///
    /// Later duplicates replace earlier ones. Entries with out-of-range
    /// coordinates are skipped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let mut airports = HashMap::new();
        for (code, lat, lon) in entries {
            let code = code.into();
            if !geo::valid_lat_long(lat, lon) {
                warn!(%code, lat, lon, "skipping airport with invalid coordinates");
                continue;
            }
            airports.insert(code, geo::to_nvec(lat, lon));
        }
        Self { airports }
    }

    /// Load an OpenFlights `airports.dat` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AirportError> {
        let path = path.as_ref();
        let directory = Self::from_openflights_reader(File::open(path)?)?;
        info!(path = %path.display(), airports = directory.len(), "loaded airport directory");
        Ok(directory)
    }

    /// Parse OpenFlights records (no header row) and add [`SUPPLEMENTARY_AIRPORTS`].
    ///
    /// Rows without an IATA code or with unparseable coordinates are skipped.
    pub fn from_openflights_reader<R: Read>(reader: R) -> Result<Self, AirportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut entries: Vec<(String, f64, f64)> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let Some(code) = record.get(fields::IATA).map(str::trim) else {
                continue;
            };
            if code.is_empty() || code == NULL_FIELD {
                continue;
            }
            let lat = record.get(fields::LATITUDE).and_then(|v| v.trim().parse::<f64>().ok());
            let lon = record.get(fields::LONGITUDE).and_then(|v| v.trim().parse::<f64>().ok());
            match (lat, lon) {
                (Some(lat), Some(lon)) => entries.push((code.to_string(), lat, lon)),
                _ => warn!(%code, "skipping airport with unparseable coordinates"),
            }
        }

        for &(code, lat, lon) in SUPPLEMENTARY_AIRPORTS {
            if !entries.iter().any(|(existing, _, _)| existing == code) {
                entries.push((code.to_string(), lat, lon));
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// Direction vector for `code`, if known.
    pub fn get(&self, code: &str) -> Option<&Nvec> {
        self.airports.get(code)
    }

    /// Direction vector for `code`, case-insensitive, or [`AirportError::Unknown`].
    pub fn lookup(&self, code: &str) -> Result<Nvec, AirportError> {
        self.get(code)
            .or_else(|| self.get(&code.to_ascii_uppercase()))
            .copied()
            .ok_or_else(|| AirportError::Unknown(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Airport codes in sorted order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.airports.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}
