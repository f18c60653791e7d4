pub mod correction;
pub mod height;
pub mod mask;
pub mod retracker;

pub use correction::CorrectionAggregator;
pub use height::HeightExtractor;
pub use mask::GeoMask;
pub use retracker::{retrack_heights, ThresholdRetracker};
