use altimcore::store::{ArrayStore, MemoryStore};
use anyhow::{bail, Context};
use std::path::Path;

const DIMENSION_NAMES: [&str; 3] = ["time", "meas_ind", "wvf_ind"];

/// Writes every variable of `store` as a double-precision netCDF variable.
///
/// Dimensions follow the sensor data record layout: `time` for 1Hz records,
/// `meas_ind` for the 20Hz subsamples and `wvf_ind` for waveform gates.
pub fn write_netcdf(store: &MemoryStore, path: &Path) -> anyhow::Result<()> {
    let mut file = netcdf::create(path)
        .with_context(|| format!("creating netCDF file {}", path.display()))?;

    let mut names: Vec<&str> = store.names().collect();
    names.sort_unstable();

    let mut lengths: [Option<usize>; 3] = [None; 3];
    for name in &names {
        let array = store.read(name)?;
        if array.ndim() == 0 || array.ndim() > DIMENSION_NAMES.len() {
            bail!("cannot export {} with {} dimensions", name, array.ndim());
        }
        for (axis, &len) in array.shape().iter().enumerate() {
            match lengths[axis] {
                None => {
                    file.add_dimension(DIMENSION_NAMES[axis], len)
                        .with_context(|| format!("adding dimension {}", DIMENSION_NAMES[axis]))?;
                    lengths[axis] = Some(len);
                }
                Some(existing) if existing != len => {
                    bail!(
                        "{} has {} entries along {}, expected {}",
                        name,
                        len,
                        DIMENSION_NAMES[axis],
                        existing
                    );
                }
                Some(_) => {}
            }
        }
    }

    for name in &names {
        let array = store.read(name)?;
        let dims = &DIMENSION_NAMES[..array.ndim()];
        let values = array.as_standard_layout();
        let data = values
            .as_slice()
            .with_context(|| format!("{} is not contiguous", name))?;
        let mut var = file
            .add_variable::<f64>(name, dims)
            .with_context(|| format!("adding variable {}", name))?;
        var.put_values(data, ..)
            .with_context(|| format!("writing variable {}", name))?;
    }
    Ok(())
}
