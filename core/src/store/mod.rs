//! Named multi-dimensional arrays backing a [`crate::dataset::Dataset`].

pub mod memory;
pub mod netcdf_store;

pub use self::memory::MemoryStore;
pub use self::netcdf_store::NetcdfStore;

use ndarray::ArrayD;

use crate::prelude::AltimetryResult;

/// Variable names read from sensor geophysical data records.
pub mod names {
    pub const LATITUDE_20HZ: &str = "lat_20hz";
    pub const LONGITUDE_20HZ: &str = "lon_20hz";
    pub const ALTITUDE_20HZ: &str = "alt_20hz";
    pub const TIME: &str = "time";
    pub const WAVEFORMS_20HZ_KU: &str = "waveforms_20hz_ku";
    pub const RANGE_20HZ_KU: &str = "range_20hz_ku";
    pub const RANGE_20HZ_KU_MLE3: &str = "range_20hz_ku_mle3";
    pub const ICE_RANGE_20HZ_KU: &str = "ice_range_20hz_ku";
    pub const DRY_TROPO_CORRECTION: &str = "model_dry_tropo_corr";
    pub const WET_TROPO_CORRECTION: &str = "model_wet_tropo_corr";
    pub const IONO_CORRECTION: &str = "iono_corr_gim_ku";
    pub const SOLID_EARTH_TIDE: &str = "solid_earth_tide";
    pub const POLE_TIDE: &str = "pole_tide";

    /// Per-record terms summed into the 1Hz correction.
    pub const CORRECTIONS: [&str; 5] = [
        DRY_TROPO_CORRECTION,
        WET_TROPO_CORRECTION,
        IONO_CORRECTION,
        SOLID_EARTH_TIDE,
        POLE_TIDE,
    ];
}

/// Read-only access to named numeric variables.
///
/// Implementations return physical values: packed integers are unpacked and
/// fill values are reported as NaN.
pub trait ArrayStore {
    /// Fails with `MissingVariable` when `name` is not present.
    fn read(&self, name: &str) -> AltimetryResult<ArrayD<f64>>;
}

impl<S: ArrayStore + ?Sized> ArrayStore for &S {
    fn read(&self, name: &str) -> AltimetryResult<ArrayD<f64>> {
        (**self).read(name)
    }
}
