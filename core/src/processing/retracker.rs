//! Threshold retracking of the waveform leading edge.
//!
//! For each waveform the noise floor is the mean of the whole row and the
//! threshold sits `level` of the way from that floor to the peak. The first
//! gate at or above the threshold (scanning from gate 1) is refined by linear
//! interpolation against the preceding gate, and the fractional gate is turned
//! into a correction of the MLE3 height.

use crate::math::stats::StatsHelper;
use crate::prelude::{AltimetryError, AltimetryResult, Retracker, RetrackerConfig};
use crate::products::{Height, Waveforms};
use crate::telemetry::log::LogManager;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRetracker {
    level: f64,
}

impl ThresholdRetracker {
    /// `level` must lie in `(0, 1]`.
    pub fn new(level: f64) -> AltimetryResult<Self> {
        if !(level > 0.0 && level <= 1.0) {
            return Err(AltimetryError::InvalidParameter(format!(
                "threshold level {} outside (0, 1]",
                level
            )));
        }
        Ok(Self { level })
    }

    /// Power threshold for one waveform, or `None` when it has no leading edge.
    pub fn threshold(&self, waveform: &[f64]) -> Option<f64> {
        let peak = StatsHelper::peak(waveform)?;
        let floor = StatsHelper::mean(waveform);
        if peak == floor {
            return None;
        }
        Some(floor + self.level * (peak - floor))
    }
}

impl Retracker for ThresholdRetracker {
    fn retrack_bin(&self, waveform: &[f64]) -> Option<f64> {
        let threshold = self.threshold(waveform)?;
        let crossing = (1..waveform.len()).find(|&gate| waveform[gate] >= threshold)?;

        let previous = waveform[crossing - 1];
        let value = waveform[crossing];
        let base = (crossing - 1) as f64;
        if value == previous {
            Some(base)
        } else {
            Some(base + (threshold - previous) / (value - previous))
        }
    }
}

impl RetrackerConfig {
    /// Offset, in metres, subtracted from the reference height for a retracked gate.
    pub fn gate_offset(&self, gate: f64) -> f64 {
        (self.reference_gate - gate + 1.0) * self.gate_to_meters
    }
}

/// Retracks every waveform row against the matching MLE3 height.
///
/// Rows without a crossing produce NaN; they are kept so `values` stays aligned
/// with `latitudes`.
pub fn retrack_heights<R: Retracker>(
    retracker: &R,
    config: &RetrackerConfig,
    waveforms: &Waveforms,
    mle3: &Height,
) -> AltimetryResult<Height> {
    if waveforms.len() != mle3.count() {
        return Err(AltimetryError::ShapeMismatch {
            variable: "range_20hz_ku_mle3".to_string(),
            expected: format!("{} masked samples", waveforms.len()),
            found: vec![mle3.count()],
        });
    }

    let values: Vec<f64> = waveforms
        .rows()
        .zip(mle3.values.iter())
        .map(|(row, &reference)| {
            let bin = match row.as_slice() {
                Some(samples) => retracker.retrack_bin(samples),
                None => retracker.retrack_bin(&row.to_vec()),
            };
            bin.map_or(f64::NAN, |bin| reference - config.gate_offset(bin))
        })
        .collect();

    let missed = values.iter().filter(|v| v.is_nan()).count();
    if missed > 0 {
        LogManager::new("retracker").warn(&format!(
            "{} of {} waveforms produced no height",
            missed,
            values.len()
        ));
    }

    Ok(Height::from_values(values, waveforms.latitudes.clone()))
}
