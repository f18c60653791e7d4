//! Facade binding one backing store to a geographic filter.
//!
//! Every accessor recomputes from the store; nothing is cached between calls.
//! Within one `get_heights` call the 20Hz mask is built once.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2, Axis};

use crate::epoch::epoch_to_datetime;
use crate::math::grid::GridHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{AltimetryError, AltimetryResult, Bounds, RetrackerConfig};
use crate::processing::{retrack_heights, CorrectionAggregator, GeoMask, HeightExtractor, ThresholdRetracker};
use crate::products::{CombinedHeights, Height, Waveforms};
use crate::store::{names, ArrayStore};
use crate::telemetry::log::LogManager;

pub const OCEAN: &str = "ocean";
pub const MLE3: &str = "mle3";
pub const ICE: &str = "ice";

/// Threshold level used for the combined height report.
pub const DEFAULT_THRESHOLD_LEVEL: f64 = 0.50;

/// Key of a threshold height in [`CombinedHeights`], e.g. `threshold_50`.
pub fn threshold_kind(level: f64) -> String {
    format!("threshold_{}", (level * 100.0).round() as i64)
}

pub struct Dataset<S> {
    store: S,
    mask: GeoMask,
    retracker: RetrackerConfig,
    logger: LogManager,
}

/// 20Hz selection shared by the accessors of one call.
struct Selection {
    mask: Array2<bool>,
    latitudes: Array2<f64>,
}

impl<S: ArrayStore> Dataset<S> {
    pub fn new(store: S, bounds: Bounds) -> Self {
        Self {
            store,
            mask: GeoMask::new(bounds),
            retracker: RetrackerConfig::default(),
            logger: LogManager::new("dataset"),
        }
    }

    pub fn with_retracker_config(mut self, config: RetrackerConfig) -> Self {
        self.retracker = config;
        self
    }

    /// Masked 20Hz waveforms, optionally clipped to `[0, clip]`.
    ///
    /// Clipping maps fill gates (read as NaN) to zero, so every clipped value
    /// lies in `[0, clip]`. Without `clip` they stay NaN.
    pub fn get_waveforms(&self, clip: Option<f64>) -> AltimetryResult<Waveforms> {
        if let Some(clip) = clip {
            if clip.is_nan() || clip < 0.0 {
                return Err(AltimetryError::InvalidParameter(format!(
                    "clip {} must be non-negative",
                    clip
                )));
            }
        }
        self.waveforms(&self.selection()?, clip)
    }

    pub fn get_sea_surface_height(&self) -> AltimetryResult<Height> {
        self.single_height(names::RANGE_20HZ_KU)
    }

    pub fn get_mle3_height(&self) -> AltimetryResult<Height> {
        self.single_height(names::RANGE_20HZ_KU_MLE3)
    }

    pub fn get_ice_height(&self) -> AltimetryResult<Height> {
        self.single_height(names::ICE_RANGE_20HZ_KU)
    }

    /// Heights from the threshold retracker at `level`, referenced to MLE3.
    pub fn get_threshold_height(&self, level: f64) -> AltimetryResult<Height> {
        let retracker = ThresholdRetracker::new(level)?;
        let selection = self.selection()?;
        let waveforms = self.waveforms(&selection, None)?;
        let mle3 = self.height(&selection, &self.correction_grid()?, names::RANGE_20HZ_KU_MLE3)?;
        retrack_heights(&retracker, &self.retracker, &waveforms, &mle3)
    }

    /// Ocean, MLE3, ice and 50% threshold heights with the median acquisition time.
    ///
    /// The 20Hz mask, corrections and MLE3 heights are computed once and shared.
    pub fn get_heights(&self) -> AltimetryResult<CombinedHeights> {
        let retracker = ThresholdRetracker::new(DEFAULT_THRESHOLD_LEVEL)?;
        let selection = self.selection()?;
        let correction = self.correction_grid()?;

        let ocean = self.height(&selection, &correction, names::RANGE_20HZ_KU)?;
        let mle3 = self.height(&selection, &correction, names::RANGE_20HZ_KU_MLE3)?;
        let ice = self.height(&selection, &correction, names::ICE_RANGE_20HZ_KU)?;
        let waveforms = self.waveforms(&selection, None)?;
        let threshold = retrack_heights(&retracker, &self.retracker, &waveforms, &mle3)?;
        let timestamp = self.timestamp(&selection.mask)?;

        let samples = ocean.count();
        if samples == 0 {
            self.logger.warn("bounds exclude every sample; heights are empty");
        } else {
            self.logger.record(&format!(
                "{} samples retained, acquired {}",
                samples,
                timestamp.map_or_else(|| "at unknown time".to_string(), |t| t.to_rfc3339())
            ));
        }

        let mut heights = BTreeMap::new();
        heights.insert(OCEAN.to_string(), ocean);
        heights.insert(MLE3.to_string(), mle3);
        heights.insert(ICE.to_string(), ice);
        heights.insert(threshold_kind(DEFAULT_THRESHOLD_LEVEL), threshold);
        Ok(CombinedHeights { heights, timestamp })
    }

    /// Median raw epoch over included 1Hz records, converted to UTC.
    pub fn representative_timestamp(&self) -> AltimetryResult<Option<DateTime<Utc>>> {
        self.timestamp(&self.subsample_mask()?)
    }

    /// 1Hz inclusion mask.
    pub fn record_mask(&self) -> AltimetryResult<Array1<bool>> {
        Ok(GeoMask::record_mask(self.subsample_mask()?.view()))
    }

    /// 20Hz inclusion mask.
    pub fn subsample_mask(&self) -> AltimetryResult<Array2<bool>> {
        Ok(self.selection()?.mask)
    }

    /// Summed geophysical corrections broadcast to `[records, 20]`.
    pub fn correction_grid(&self) -> AltimetryResult<Array2<f64>> {
        let mut terms = Vec::with_capacity(names::CORRECTIONS.len());
        for name in names::CORRECTIONS {
            terms.push((name, GridHelper::to_records(name, self.store.read(name)?)?));
        }
        let views: Vec<_> = terms.iter().map(|(name, term)| (*name, term.view())).collect();
        CorrectionAggregator::aggregate(&views)
    }

    fn selection(&self) -> AltimetryResult<Selection> {
        let latitudes = self.grid(names::LATITUDE_20HZ)?;
        let longitudes = self.grid(names::LONGITUDE_20HZ)?;
        let mask = self.mask.subsample_mask(latitudes.view(), longitudes.view())?;
        Ok(Selection { mask, latitudes })
    }

    fn waveforms(&self, selection: &Selection, clip: Option<f64>) -> AltimetryResult<Waveforms> {
        let mask = &selection.mask;
        let rows = GridHelper::to_waveform_rows(
            names::WAVEFORMS_20HZ_KU,
            self.store.read(names::WAVEFORMS_20HZ_KU)?,
        )?;
        if rows.nrows() != mask.len() {
            return Err(AltimetryError::ShapeMismatch {
                variable: names::WAVEFORMS_20HZ_KU.to_string(),
                expected: format!("{} waveform rows", mask.len()),
                found: rows.shape().to_vec(),
            });
        }

        let indices = GridHelper::masked_indices(mask.view());
        let mut values = rows.select(Axis(0), &indices);
        if let Some(clip) = clip {
            values.mapv_inplace(|power| if power.is_nan() { 0.0 } else { power.clamp(0.0, clip) });
        }

        let latitudes = GridHelper::select_masked(selection.latitudes.view(), mask.view());
        self.logger.detail(&format!(
            "{} waveforms of {} bins selected",
            values.nrows(),
            values.ncols()
        ));
        Ok(Waveforms { values, latitudes })
    }

    fn timestamp(&self, mask: &Array2<bool>) -> AltimetryResult<Option<DateTime<Utc>>> {
        let records = GeoMask::record_mask(mask.view());
        let time = GridHelper::to_records(names::TIME, self.store.read(names::TIME)?)?;
        if time.len() != records.len() {
            return Err(AltimetryError::ShapeMismatch {
                variable: names::TIME.to_string(),
                expected: format!("[{}]", records.len()),
                found: vec![time.len()],
            });
        }
        let included = GridHelper::select_records(time.view(), records.view());
        Ok(StatsHelper::median(&included).and_then(epoch_to_datetime))
    }

    fn single_height(&self, range_name: &str) -> AltimetryResult<Height> {
        self.height(&self.selection()?, &self.correction_grid()?, range_name)
    }

    fn height(
        &self,
        selection: &Selection,
        correction: &Array2<f64>,
        range_name: &str,
    ) -> AltimetryResult<Height> {
        let altitude = self.grid(names::ALTITUDE_20HZ)?;
        let range = self.grid(range_name)?;
        let height = HeightExtractor::new(range_name).extract(
            altitude.view(),
            correction.view(),
            range.view(),
            selection.latitudes.view(),
            selection.mask.view(),
        )?;
        self.logger.detail(&format!(
            "{}: {} samples, mean {:.4}",
            range_name,
            height.count(),
            height.mean
        ));
        Ok(height)
    }

    fn grid(&self, name: &str) -> AltimetryResult<Array2<f64>> {
        GridHelper::to_grid(name, self.store.read(name)?)
    }
}
