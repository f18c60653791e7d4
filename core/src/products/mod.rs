pub mod height;
pub mod waveform;

pub use height::{CombinedHeights, Height, HeightSummary};
pub use waveform::Waveforms;
