use ndarray::{ArrayView2, Zip};

use crate::math::grid::GridHelper;
use crate::prelude::{AltimetryError, AltimetryResult};
use crate::products::Height;

/// Corrected height from one range source: `altitude - correction - range`.
pub struct HeightExtractor<'a> {
    range_name: &'a str,
}

impl<'a> HeightExtractor<'a> {
    pub fn new(range_name: &'a str) -> Self {
        Self { range_name }
    }

    /// Computes heights over the full grid, then keeps masked samples in row-major order.
    pub fn extract(
        &self,
        altitude: ArrayView2<f64>,
        correction: ArrayView2<f64>,
        range: ArrayView2<f64>,
        latitudes: ArrayView2<f64>,
        mask: ArrayView2<bool>,
    ) -> AltimetryResult<Height> {
        let expected = altitude.dim();
        for (name, shape) in [
            ("correction", correction.dim()),
            (self.range_name, range.dim()),
            ("lat_20hz", latitudes.dim()),
            ("mask", mask.dim()),
        ] {
            if shape != expected {
                return Err(AltimetryError::ShapeMismatch {
                    variable: name.to_string(),
                    expected: format!("{:?}", expected),
                    found: vec![shape.0, shape.1],
                });
            }
        }

        let heights = Zip::from(&altitude)
            .and(&correction)
            .and(&range)
            .map_collect(|&alt, &corr, &rng| alt - corr - rng);

        let values = GridHelper::select_masked(heights.view(), mask);
        let latitudes = GridHelper::select_masked(latitudes, mask);
        Ok(Height::from_values(values, latitudes))
    }
}
