use ndarray::{Array1, Array2, ArrayView1};

use crate::math::grid::GridHelper;
use crate::prelude::{AltimetryError, AltimetryResult, SUBSAMPLES_PER_RECORD};

/// Sums per-record geophysical correction terms and spreads them over the 20Hz grid.
pub struct CorrectionAggregator;

impl CorrectionAggregator {
    /// Elementwise sum of named `[records]` terms.
    pub fn sum(terms: &[(&str, ArrayView1<f64>)]) -> AltimetryResult<Array1<f64>> {
        let records = terms.first().map(|(_, term)| term.len()).unwrap_or(0);
        let mut total = Array1::<f64>::zeros(records);
        for (name, term) in terms {
            if term.len() != records {
                return Err(AltimetryError::ShapeMismatch {
                    variable: name.to_string(),
                    expected: format!("[{}]", records),
                    found: term.shape().to_vec(),
                });
            }
            total += term;
        }
        Ok(total)
    }

    /// `[records] -> [records, 20]`; each record's correction is replicated across its subsamples.
    pub fn broadcast(correction: ArrayView1<f64>) -> Array2<f64> {
        GridHelper::broadcast_records(correction, SUBSAMPLES_PER_RECORD)
    }

    pub fn aggregate(terms: &[(&str, ArrayView1<f64>)]) -> AltimetryResult<Array2<f64>> {
        let total = Self::sum(terms)?;
        Ok(Self::broadcast(total.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn aggregate_sums_terms_and_fills_every_subsample() {
        let dry = arr1(&[-2.3, -2.2]);
        let wet = arr1(&[-0.1, -0.2]);
        let iono = arr1(&[-0.05, -0.05]);
        let solid = arr1(&[0.1, 0.2]);
        let pole = arr1(&[0.01, 0.02]);
        let grid = CorrectionAggregator::aggregate(&[
            ("model_dry_tropo_corr", dry.view()),
            ("model_wet_tropo_corr", wet.view()),
            ("iono_corr_gim_ku", iono.view()),
            ("solid_earth_tide", solid.view()),
            ("pole_tide", pole.view()),
        ])
        .unwrap();

        assert_eq!(grid.dim(), (2, 20));
        let first = -2.3 - 0.1 - 0.05 + 0.1 + 0.01;
        let second = -2.2 - 0.2 - 0.05 + 0.2 + 0.02;
        assert!(grid.row(0).iter().all(|&v| (v - first).abs() < 1e-12));
        assert!(grid.row(1).iter().all(|&v| (v - second).abs() < 1e-12));
    }

    #[test]
    fn nan_term_propagates_to_its_record_only() {
        let a = arr1(&[1.0, f64::NAN]);
        let b = arr1(&[2.0, 2.0]);
        let grid = CorrectionAggregator::aggregate(&[("a", a.view()), ("b", b.view())]).unwrap();
        assert!(grid.row(0).iter().all(|&v| v == 3.0));
        assert!(grid.row(1).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn terms_of_different_length_are_rejected() {
        let a = arr1(&[1.0, 2.0]);
        let b = arr1(&[1.0]);
        let err = CorrectionAggregator::sum(&[("a", a.view()), ("pole_tide", b.view())]).unwrap_err();
        match err {
            AltimetryError::ShapeMismatch { variable, .. } => assert_eq!(variable, "pole_tide"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
