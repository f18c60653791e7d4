use ndarray::{Array2, ArrayView1};

/// Masked 20Hz waveforms, one row per retained subsample.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveforms {
    pub values: Array2<f64>,
    pub latitudes: Vec<f64>,
}

impl Waveforms {
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Number of power bins per waveform.
    pub fn bins(&self) -> usize {
        self.values.ncols()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.values.rows().into_iter()
    }

    /// Owned copy as nested vectors, for serialization.
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}
