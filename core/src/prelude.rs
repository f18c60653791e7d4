use serde::{Deserialize, Serialize};

/// Number of 20Hz subsamples carried by each 1Hz record.
pub const SUBSAMPLES_PER_RECORD: usize = 20;

/// Rectangular geographic filter applied to every 20Hz sample.
///
/// Longitude bounds are optional; a missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_longitude: Option<f64>,
}

impl Bounds {
    pub fn latitude_only(min_latitude: f64, max_latitude: f64) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude: None,
            max_longitude: None,
        }
    }

    pub fn with_longitude(mut self, min_longitude: Option<f64>, max_longitude: Option<f64>) -> Self {
        self.min_longitude = min_longitude;
        self.max_longitude = max_longitude;
        self
    }

    /// Inclusive on every edge. NaN coordinates are never contained.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && self.min_longitude.map_or(true, |min| longitude >= min)
            && self.max_longitude.map_or(true, |max| longitude <= max)
    }
}

/// Instrument calibration used to turn a retracked gate into metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrackerConfig {
    /// Range distance covered by one waveform gate, in metres.
    pub gate_to_meters: f64,
    /// Gate the onboard tracker aligns the nominal leading edge to.
    pub reference_gate: f64,
}

impl Default for RetrackerConfig {
    fn default() -> Self {
        Self {
            gate_to_meters: 0.4684375,
            reference_gate: 32.0,
        }
    }
}

/// Common error type for store access and extraction.
#[derive(thiserror::Error, Debug)]
pub enum AltimetryError {
    #[error("missing variable: {0}")]
    MissingVariable(String),
    #[error("shape mismatch for {variable}: expected {expected}, found {found:?}")]
    ShapeMismatch {
        variable: String,
        expected: String,
        found: Vec<usize>,
    },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("store failure: {0}")]
    Store(String),
}

pub type AltimetryResult<T> = Result<T, AltimetryError>;

/// Locates the leading edge of one waveform as a fractional gate index.
pub trait Retracker {
    /// Returns `None` when the waveform never satisfies the retracker's criterion.
    fn retrack_bin(&self, waveform: &[f64]) -> Option<f64>;
}
