//! netCDF-backed store.
//!
//! Values are unpacked on read the way CF readers do: `_FillValue` and
//! `missing_value` entries become NaN, then `scale_factor` and `add_offset`
//! are applied when present.

use std::path::{Path, PathBuf};

use ndarray::{ArrayD, IxDyn};

use super::ArrayStore;
use crate::prelude::{AltimetryError, AltimetryResult};
use crate::telemetry::LogManager;

pub struct NetcdfStore {
    file: ::netcdf::File,
    path: PathBuf,
}

impl NetcdfStore {
    /// Opens `path` read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> AltimetryResult<Self> {
        let path = path.as_ref();
        let file = ::netcdf::open(path).map_err(|e| {
            AltimetryError::Store(format!("failed to open {}: {}", path.display(), e))
        })?;
        LogManager::new("store").detail(&format!("opened {}", path.display()));
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl ArrayStore for NetcdfStore {
    fn read(&self, name: &str) -> AltimetryResult<ArrayD<f64>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| AltimetryError::MissingVariable(name.to_string()))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|dim| dim.len()).collect();
        let raw: Vec<f64> = var.get_values::<f64, _>(..).map_err(|e| {
            AltimetryError::Store(format!(
                "failed to read {} from {}: {}",
                name,
                self.path.display(),
                e
            ))
        })?;

        let fill_value = get_f64_attr(&var, "_FillValue");
        let missing_value = get_f64_attr(&var, "missing_value");
        let scale_factor = get_f64_attr(&var, "scale_factor").unwrap_or(1.0);
        let add_offset = get_f64_attr(&var, "add_offset").unwrap_or(0.0);

        let values: Vec<f64> = raw
            .into_iter()
            .map(|value| {
                if Some(value) == fill_value || Some(value) == missing_value {
                    f64::NAN
                } else {
                    value * scale_factor + add_offset
                }
            })
            .collect();

        ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| AltimetryError::ShapeMismatch {
            variable: name.to_string(),
            expected: "element count matching declared dimensions".to_string(),
            found: shape.clone(),
        })
    }
}

/// Checks attribute presence first so absent optional attributes stay quiet.
fn has_attr(var: &::netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &::netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}
