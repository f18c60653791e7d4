//! Height extraction core for radar-altimeter sensor data records.
//!
//! Samples are geo-masked on the 20Hz grid, corrected with summed 1Hz
//! geophysical terms and turned into ocean, MLE3, ice and threshold-retracked
//! heights. [`dataset::Dataset`] orchestrates the stages over any
//! [`store::ArrayStore`], such as a netCDF file.

pub mod dataset;
pub mod epoch;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod products;
pub mod store;
pub mod telemetry;

pub use dataset::Dataset;
pub use prelude::{AltimetryError, AltimetryResult, Bounds, RetrackerConfig};
pub use products::{CombinedHeights, Height, HeightSummary, Waveforms};
