use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, Axis};

use crate::prelude::{AltimetryError, AltimetryResult, SUBSAMPLES_PER_RECORD};

/// Shape helpers between raw store arrays and the `[record, subsample]` grid.
pub struct GridHelper;

impl GridHelper {
    /// Replicates each record's scalar across its subsamples: `[records] -> [records, subsamples]`.
    pub fn broadcast_records(values: ArrayView1<f64>, subsamples: usize) -> Array2<f64> {
        Array2::from_shape_fn((values.len(), subsamples), |(record, _)| values[record])
    }

    /// Logical-OR of every subsample flag within a record.
    pub fn any_per_record(mask: ArrayView2<bool>) -> Array1<bool> {
        mask.map_axis(Axis(1), |flags| flags.iter().any(|&flag| flag))
    }

    /// Row-major selection of the grid cells whose mask flag is set.
    pub fn select_masked(values: ArrayView2<f64>, mask: ArrayView2<bool>) -> Vec<f64> {
        values
            .iter()
            .zip(mask.iter())
            .filter_map(|(&value, &keep)| keep.then_some(value))
            .collect()
    }

    /// Selects per-record values whose record flag is set.
    pub fn select_records(values: ArrayView1<f64>, mask: ArrayView1<bool>) -> Vec<f64> {
        values
            .iter()
            .zip(mask.iter())
            .filter_map(|(&value, &keep)| keep.then_some(value))
            .collect()
    }

    /// Indices of set flags in the row-major flattening of `mask`.
    pub fn masked_indices(mask: ArrayView2<bool>) -> Vec<usize> {
        mask.iter()
            .enumerate()
            .filter_map(|(index, &keep)| keep.then_some(index))
            .collect()
    }

    /// Reshapes a per-subsample variable to `[records, 20]`.
    pub fn to_grid(name: &str, array: ArrayD<f64>) -> AltimetryResult<Array2<f64>> {
        let found = array.shape().to_vec();
        if array.len() % SUBSAMPLES_PER_RECORD != 0 {
            return Err(shape_mismatch(name, "[records, 20]", found));
        }
        let records = array.len() / SUBSAMPLES_PER_RECORD;
        array
            .as_standard_layout()
            .into_owned()
            .into_shape((records, SUBSAMPLES_PER_RECORD))
            .map_err(|_| shape_mismatch(name, "[records, 20]", found))
    }

    /// Reshapes a waveform variable to one row per subsample: `[records * 20, bins]`.
    pub fn to_waveform_rows(name: &str, array: ArrayD<f64>) -> AltimetryResult<Array2<f64>> {
        let found = array.shape().to_vec();
        let bins = match found.last().copied() {
            Some(bins) if found.len() >= 2 && bins > 0 => bins,
            _ => return Err(shape_mismatch(name, "[records, 20, bins]", found)),
        };
        if array.len() % (SUBSAMPLES_PER_RECORD * bins) != 0 {
            return Err(shape_mismatch(name, "[records, 20, bins]", found));
        }
        let rows = array.len() / bins;
        array
            .as_standard_layout()
            .into_owned()
            .into_shape((rows, bins))
            .map_err(|_| shape_mismatch(name, "[records, 20, bins]", found))
    }

    /// Validates a per-record (1Hz) variable.
    pub fn to_records(name: &str, array: ArrayD<f64>) -> AltimetryResult<Array1<f64>> {
        let found = array.shape().to_vec();
        if found.len() != 1 {
            return Err(shape_mismatch(name, "[records]", found));
        }
        let len = found[0];
        array
            .as_standard_layout()
            .into_owned()
            .into_shape(len)
            .map_err(|_| shape_mismatch(name, "[records]", found))
    }
}

fn shape_mismatch(name: &str, expected: &str, found: Vec<usize>) -> AltimetryError {
    AltimetryError::ShapeMismatch {
        variable: name.to_string(),
        expected: expected.to_string(),
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array3, IxDyn};

    #[test]
    fn broadcast_replicates_each_record() {
        let grid = GridHelper::broadcast_records(arr1(&[1.0, 2.0]).view(), 3);
        assert_eq!(grid, arr2(&[[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]));
    }

    #[test]
    fn record_mask_is_or_of_subsamples() {
        let mask = arr2(&[[false, false], [false, true], [true, true]]);
        let records = GridHelper::any_per_record(mask.view());
        assert_eq!(records, arr1(&[false, true, true]));
    }

    #[test]
    fn select_masked_keeps_row_major_order() {
        let values = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let mask = arr2(&[[false, true], [true, true]]);
        assert_eq!(
            GridHelper::select_masked(values.view(), mask.view()),
            vec![2.0, 3.0, 4.0]
        );
        assert_eq!(GridHelper::masked_indices(mask.view()), vec![1, 2, 3]);
    }

    #[test]
    fn to_grid_reshapes_flat_subsamples() {
        let flat = ArrayD::from_shape_vec(IxDyn(&[40]), (0..40).map(f64::from).collect()).unwrap();
        let grid = GridHelper::to_grid("lat_20hz", flat).unwrap();
        assert_eq!(grid.dim(), (2, 20));
        assert_eq!(grid[[1, 0]], 20.0);
    }

    #[test]
    fn to_grid_rejects_partial_records() {
        let flat = ArrayD::zeros(IxDyn(&[3, 7]));
        let err = GridHelper::to_grid("alt_20hz", flat).unwrap_err();
        assert!(matches!(err, AltimetryError::ShapeMismatch { .. }));
    }

    #[test]
    fn waveform_rows_flatten_records_and_subsamples() {
        let cube = Array3::<f64>::zeros((3, 20, 8)).into_dyn();
        let rows = GridHelper::to_waveform_rows("waveforms_20hz_ku", cube).unwrap();
        assert_eq!(rows.dim(), (60, 8));

        let flat = ArrayD::<f64>::zeros(IxDyn(&[64]));
        assert!(GridHelper::to_waveform_rows("waveforms_20hz_ku", flat).is_err());
    }

    #[test]
    fn to_records_requires_one_dimension() {
        let grid = ArrayD::<f64>::zeros(IxDyn(&[2, 20]));
        assert!(GridHelper::to_records("pole_tide", grid).is_err());
        let records = ArrayD::<f64>::zeros(IxDyn(&[5]));
        assert_eq!(GridHelper::to_records("pole_tide", records).unwrap().len(), 5);
    }
}
