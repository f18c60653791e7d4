use ndarray::{Array1, Array2, ArrayView2, Zip};

use crate::math::grid::GridHelper;
use crate::prelude::{AltimetryError, AltimetryResult, Bounds};

/// Geographic inclusion masks over the `[record, subsample]` grid.
pub struct GeoMask {
    bounds: Bounds,
}

impl GeoMask {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    /// 20Hz mask: one flag per subsample.
    pub fn subsample_mask(
        &self,
        latitudes: ArrayView2<f64>,
        longitudes: ArrayView2<f64>,
    ) -> AltimetryResult<Array2<bool>> {
        if latitudes.dim() != longitudes.dim() {
            return Err(AltimetryError::ShapeMismatch {
                variable: "lon_20hz".to_string(),
                expected: format!("{:?} to match latitudes", latitudes.dim()),
                found: longitudes.shape().to_vec(),
            });
        }
        Ok(Zip::from(&latitudes)
            .and(&longitudes)
            .map_collect(|&lat, &lon| self.bounds.contains(lat, lon)))
    }

    /// 1Hz mask: a record is included iff any of its subsamples is.
    pub fn record_mask(subsample_mask: ArrayView2<bool>) -> Array1<bool> {
        GridHelper::any_per_record(subsample_mask)
    }
}
