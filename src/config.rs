use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://openjdk.org/jeps/";
pub const DEFAULT_DELAY_MIN: f64 = 1.0;
pub const DEFAULT_DELAY_MAX: f64 = 5.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("jep_report/", env!("CARGO_PKG_VERSION"));

/// Output shape of a run. The versioned layout stamps every row with a
/// release tag and uses the shorter link text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Plain,
    Versioned { release: String },
}

impl Layout {
    pub fn from_release(release: Option<String>) -> Self {
        match release {
            Some(release) => Layout::Versioned { release },
            None => Layout::Plain,
        }
    }

    /// Separator between id and description in the input list.
    pub fn default_separator(&self) -> &'static str {
        match self {
            Layout::Plain => ": ",
            Layout::Versioned { .. } => ":",
        }
    }

    pub fn release(&self) -> Option<&str> {
        match self {
            Layout::Plain => None,
            Layout::Versioned { release } => Some(release),
        }
    }
}

/// Inclusive range, in seconds, the per-request delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    min: f64,
    max: f64,
}

impl DelayRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let representable = |secs: f64| Duration::try_from_secs_f64(secs).is_ok();
        let valid = min >= 0.0 && min <= max && representable(min) && representable(max);
        if !valid {
            return Err(ConfigError::InvalidDelay { min, max });
        }
        Ok(Self { min, max })
    }

    #[cfg(test)]
    pub fn none() -> Self {
        Self { min: 0.0, max: 0.0 }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_DELAY_MIN,
            max: DEFAULT_DELAY_MAX,
        }
    }
}

/// Per-request timeout; zero would fail every request before it is sent.
pub fn timeout_from_secs(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout);
    }
    Ok(Duration::from_secs(secs))
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub layout: Layout,
    pub separator: String,
    pub delay: DelayRange,
    pub timeout: Duration,
    pub base_url: String,
}

impl RunConfig {
    pub fn new(input: PathBuf, layout: Layout) -> Self {
        let separator = layout.default_separator().to_string();
        Self {
            input,
            layout,
            separator,
            delay: DelayRange::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_defaults() {
        let d = DelayRange::default();
        assert_eq!(d.min(), 1.0);
        assert_eq!(d.max(), 5.0);
    }

    #[test]
    fn delay_rejects_inverted_range() {
        assert!(matches!(
            DelayRange::new(5.0, 1.0),
            Err(ConfigError::InvalidDelay { .. })
        ));
    }

    #[test]
    fn delay_rejects_negative_and_nan() {
        assert!(DelayRange::new(-1.0, 2.0).is_err());
        assert!(DelayRange::new(0.0, f64::NAN).is_err());
        assert!(DelayRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn delay_rejects_bounds_too_large_for_duration() {
        assert!(matches!(
            DelayRange::new(1e20, 1e20),
            Err(ConfigError::InvalidDelay { .. })
        ));
        assert!(DelayRange::new(0.0, 1e20).is_err());
    }

    #[test]
    fn timeout_must_be_positive() {
        assert!(matches!(timeout_from_secs(0), Err(ConfigError::InvalidTimeout)));
        assert_eq!(timeout_from_secs(30).unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn delay_accepts_equal_bounds() {
        let d = DelayRange::new(2.5, 2.5).unwrap();
        assert_eq!(d.min(), d.max());
    }

    #[test]
    fn separator_follows_layout() {
        let plain = RunConfig::new("jeps.txt".into(), Layout::Plain);
        assert_eq!(plain.separator, ": ");
        let versioned = RunConfig::new("jeps.txt".into(), Layout::from_release(Some("JDK 21".into())));
        assert_eq!(versioned.separator, ":");
        assert_eq!(versioned.layout.release(), Some("JDK 21"));
    }
}
