use crate::workflow::runner::{HeightSeries, SeriesResult};
use altimcore::prelude::Bounds;
use altimcore::products::Waveforms;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Height time series for one pass, as written by the driver.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<u32>,
    pub bounds: Bounds,
    pub processed: Vec<String>,
    pub skipped: Vec<SkippedFile>,
    pub series: HeightSeries,
}

impl SeriesReport {
    pub fn new(pass: Option<u32>, bounds: Bounds, result: SeriesResult) -> Self {
        Self {
            generated_at: Utc::now(),
            pass,
            bounds,
            processed: result
                .processed
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            skipped: result
                .skipped
                .into_iter()
                .map(|(path, reason)| SkippedFile {
                    path: path.display().to_string(),
                    reason,
                })
                .collect(),
            series: result.series,
        }
    }
}

/// Masked waveforms of one acquisition.
#[derive(Debug, Clone, Serialize)]
pub struct WaveformReport {
    pub source: String,
    pub bins: usize,
    pub latitudes: Vec<f64>,
    pub waveforms: Vec<Vec<f64>>,
}

impl WaveformReport {
    pub fn new(source: String, waveforms: &Waveforms) -> Self {
        Self {
            source,
            bins: waveforms.bins(),
            latitudes: waveforms.latitudes.clone(),
            waveforms: waveforms.to_nested(),
        }
    }
}

/// Writes `report` as pretty JSON to `path`, or to stdout when no path is given.
pub fn write_report<T: Serialize>(report: &T, path: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating report directory {}", parent.display()))?;
            }
            fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use altimcore::products::HeightSummary;
    use ndarray::arr2;
    use std::path::PathBuf;

    #[test]
    fn series_report_serializes_nan_as_null() {
        let mut series = HeightSeries::new();
        series.insert(
            "threshold_50".to_string(),
            vec![HeightSummary {
                value: f64::NAN,
                count: 3,
                stddev: f64::NAN,
                datetime: None,
            }],
        );
        let result = SeriesResult {
            series,
            processed: vec![PathBuf::from("c001.nc")],
            skipped: vec![(PathBuf::from("c002.nc"), "missing".to_string())],
        };
        let report = SeriesReport::new(Some(12), Bounds::latitude_only(1.0, 2.0), result);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["pass"], 12);
        assert!(json["series"]["threshold_50"][0]["value"].is_null());
        assert_eq!(json["series"]["threshold_50"][0]["count"], 3);
        assert_eq!(json["skipped"][0]["path"], "c002.nc");
        assert!(json["bounds"].get("min_longitude").is_none());
    }

    #[test]
    fn waveform_report_keeps_rows() {
        let waveforms = Waveforms {
            values: arr2(&[[1.0, 2.0], [3.0, 4.0]]),
            latitudes: vec![10.0, 10.1],
        };
        let report = WaveformReport::new("pass.nc".to_string(), &waveforms);
        assert_eq!(report.bins, 2);
        assert_eq!(report.waveforms, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn write_report_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/pass_012.json");
        let waveforms = Waveforms {
            values: arr2(&[[1.0]]),
            latitudes: vec![0.0],
        };
        write_report(&WaveformReport::new("x".to_string(), &waveforms), Some(&path)).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"bins\": 1"));
    }
}
