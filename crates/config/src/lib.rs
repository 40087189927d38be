//! Night rule configuration and loaders for the nightflight workspace.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Constants that define regulatory night and the integration granularity.
///
/// The defaults are the values used for logbook night time: night starts 30
/// minutes after sunset and ends 30 minutes before sunrise, routes are sampled
/// at ten-minute sections, and transitions are resolved down to two-minute
/// sections before being split evenly.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NightRules {
    /// Minutes after sunset (and before sunrise) that still count as day.
    pub margin_minutes: f64,
    /// Target sampling interval for the first pass over a route.
    pub section_length_minutes: f64,
    /// Refinement stops once the section length is at or below this value.
    pub terminal_section_minutes: f64,
    /// Share of an unresolved day/night transition interval counted as night.
    pub transition_night_fraction: f64,
}

impl Default for NightRules {
    fn default() -> Self {
        Self {
            margin_minutes: 30.0,
            section_length_minutes: 10.0,
            terminal_section_minutes: 2.0,
            transition_night_fraction: 0.5,
        }
    }
}

impl NightRules {
    /// Check the rules describe a terminating, non-negative integration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.margin_minutes.is_finite() || self.margin_minutes < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "margin_minutes must be a non-negative number, got {}",
                self.margin_minutes
            )));
        }
        if !self.section_length_minutes.is_finite() || self.section_length_minutes <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "section_length_minutes must be positive, got {}",
                self.section_length_minutes
            )));
        }
        if !self.terminal_section_minutes.is_finite() || self.terminal_section_minutes <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "terminal_section_minutes must be positive, got {}",
                self.terminal_section_minutes
            )));
        }
        if !(0.0..=1.0).contains(&self.transition_night_fraction) {
            return Err(ConfigError::Invalid(format!(
                "transition_night_fraction must lie in [0, 1], got {}",
                self.transition_night_fraction
            )));
        }
        Ok(())
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid night rules: {0}")]
    Invalid(String),
}

/// Load night rules from a TOML or YAML file, chosen by extension.
///
/// Missing fields fall back to [`NightRules::default`].
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<NightRules, ConfigError> {
    let rules: NightRules = load_record(path)?;
    rules.validate()?;
    Ok(rules)
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}
