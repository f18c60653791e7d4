use altimcore::prelude::{Bounds, RetrackerConfig};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One ground track and the area of interest along it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PassConfig {
    pub number: u32,
    #[serde(flatten)]
    pub bounds: Bounds,
}

/// Project file: where the data lives, which passes to analyse and how to retrack.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub data_directory: Option<PathBuf>,
    #[serde(default)]
    pub passes: Vec<PassConfig>,
    #[serde(default)]
    pub retracker: RetrackerConfig,
}

impl ProjectConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading project config {}", path_ref.display()))?;
        let config: ProjectConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing project config {}", path_ref.display()))?;
        for pass in &config.passes {
            if pass.bounds.min_latitude > pass.bounds.max_latitude {
                bail!(
                    "pass {} has min_latitude above max_latitude in {}",
                    pass.number,
                    path_ref.display()
                );
            }
        }
        Ok(config)
    }

    /// Picks the pass to process. A number is only optional when exactly one pass is configured.
    pub fn select_pass(&self, number: Option<u32>) -> anyhow::Result<&PassConfig> {
        match (self.passes.as_slice(), number) {
            ([], _) => bail!("no passes configured for project"),
            ([only], None) => Ok(only),
            (_, None) => bail!("must provide a pass number when the project has more than one pass"),
            (passes, Some(number)) => passes
                .iter()
                .find(|pass| pass.number == number)
                .with_context(|| format!("pass {} is not configured", number)),
        }
    }

    /// Relative data files are looked up under `data_directory` when one is set.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        match &self.data_directory {
            Some(directory) if file.is_relative() => directory.join(file),
            _ => file.to_path_buf(),
        }
    }
}
