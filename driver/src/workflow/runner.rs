use altimcore::prelude::{Bounds, RetrackerConfig};
use altimcore::products::{CombinedHeights, HeightSummary, Waveforms};
use altimcore::store::{ArrayStore, NetcdfStore};
use altimcore::Dataset;
use anyhow::Context;
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per height kind, one summary per processed acquisition.
pub type HeightSeries = BTreeMap<String, Vec<HeightSummary>>;

pub struct SeriesResult {
    pub series: HeightSeries,
    pub processed: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
}

#[derive(Clone)]
pub struct Runner {
    bounds: Bounds,
    retracker: RetrackerConfig,
}

impl Runner {
    pub fn new(bounds: Bounds, retracker: RetrackerConfig) -> Self {
        Self { bounds, retracker }
    }

    fn dataset<S: ArrayStore>(&self, store: S) -> Dataset<S> {
        Dataset::new(store, self.bounds).with_retracker_config(self.retracker)
    }

    pub fn heights_for_store<S: ArrayStore>(&self, store: S) -> anyhow::Result<CombinedHeights> {
        self.dataset(store)
            .get_heights()
            .context("extracting heights")
    }

    pub fn heights_for_file(&self, path: &Path) -> anyhow::Result<CombinedHeights> {
        let store = NetcdfStore::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        self.heights_for_store(store)
            .with_context(|| format!("processing {}", path.display()))
    }

    /// Builds a height time series across cycles. Files that fail are skipped.
    pub fn heights_for_files(&self, paths: &[PathBuf]) -> SeriesResult {
        let mut result = SeriesResult {
            series: HeightSeries::new(),
            processed: Vec::new(),
            skipped: Vec::new(),
        };

        for path in paths {
            match self.heights_for_file(path) {
                Ok(combined) => {
                    append_summaries(&mut result.series, &combined);
                    result.processed.push(path.clone());
                }
                Err(err) => {
                    warn!("skipping {}: {:#}", path.display(), err);
                    result.skipped.push((path.clone(), format!("{:#}", err)));
                }
            }
        }

        info!(
            "height series built from {} files ({} skipped)",
            result.processed.len(),
            result.skipped.len()
        );
        result
    }

    pub fn waveforms_for_store<S: ArrayStore>(
        &self,
        store: S,
        clip: Option<f64>,
    ) -> anyhow::Result<Waveforms> {
        self.dataset(store)
            .get_waveforms(clip)
            .context("extracting waveforms")
    }

    pub fn waveforms_for_file(&self, path: &Path, clip: Option<f64>) -> anyhow::Result<Waveforms> {
        let store = NetcdfStore::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        self.waveforms_for_store(store, clip)
            .with_context(|| format!("processing {}", path.display()))
    }
}

pub fn append_summaries(series: &mut HeightSeries, combined: &CombinedHeights) {
    for (kind, summary) in combined.summaries() {
        series.entry(kind).or_default().push(summary);
    }
}
