use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::math::stats::StatsHelper;

/// Corrected heights for every retained 20Hz sample of one acquisition.
///
/// `mean` and `stddev` are computed over all `values`, so a single NaN makes
/// both NaN; an empty selection also yields NaN for both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Height {
    pub values: Vec<f64>,
    pub mean: f64,
    pub stddev: f64,
    pub latitudes: Vec<f64>,
}

impl Height {
    pub fn from_values(values: Vec<f64>, latitudes: Vec<f64>) -> Self {
        let mean = StatsHelper::mean(&values);
        let stddev = StatsHelper::std_dev(&values);
        Self {
            values,
            mean,
            stddev,
            latitudes,
        }
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn summary(&self, datetime: Option<DateTime<Utc>>) -> HeightSummary {
        HeightSummary {
            value: self.mean,
            count: self.count(),
            stddev: self.stddev,
            datetime,
        }
    }
}

/// Every height kind of one acquisition plus its representative time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedHeights {
    pub heights: BTreeMap<String, Height>,
    /// Median acquisition time of the included 1Hz records; `None` when nothing was included.
    pub timestamp: Option<DateTime<Utc>>,
}

impl CombinedHeights {
    pub fn get(&self, kind: &str) -> Option<&Height> {
        self.heights.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.heights.keys().map(String::as_str)
    }

    /// One summary per height kind, stamped with this acquisition's time.
    pub fn summaries(&self) -> BTreeMap<String, HeightSummary> {
        self.heights
            .iter()
            .map(|(kind, height)| (kind.clone(), height.summary(self.timestamp)))
            .collect()
    }
}

/// One point of a per-pass height time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightSummary {
    pub value: f64,
    pub count: usize,
    pub stddev: f64,
    pub datetime: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_statistics_cover_all_values() {
        let height = Height::from_values(vec![1.0, 3.0], vec![10.0, 11.0]);
        assert_eq!(height.mean, 2.0);
        assert_eq!(height.stddev, 1.0);
        assert_eq!(height.count(), 2);
    }

    #[test]
    fn height_with_nan_value_has_nan_statistics() {
        let height = Height::from_values(vec![1.0, f64::NAN, 3.0], vec![0.0; 3]);
        assert!(height.mean.is_nan());
        assert!(height.stddev.is_nan());
        assert_eq!(height.count(), 3);
    }

    #[test]
    fn empty_height_has_nan_statistics() {
        let height = Height::from_values(Vec::new(), Vec::new());
        assert!(height.is_empty());
        assert!(height.mean.is_nan());
        assert!(height.stddev.is_nan());
    }

    #[test]
    fn serialized_height_keeps_field_names() {
        let height = Height::from_values(vec![2.0], vec![45.0]);
        let json = serde_json::to_value(&height).unwrap();
        assert_eq!(json["mean"], 2.0);
        assert_eq!(json["stddev"], 0.0);
        assert_eq!(json["latitudes"][0], 45.0);
        assert_eq!(json["values"][0], 2.0);
    }

    #[test]
    fn summaries_carry_acquisition_time() {
        let mut heights = BTreeMap::new();
        heights.insert(
            "ocean".to_string(),
            Height::from_values(vec![4.0, 6.0], vec![1.0, 2.0]),
        );
        let combined = CombinedHeights {
            heights,
            timestamp: None,
        };
        let summaries = combined.summaries();
        let ocean = &summaries["ocean"];
        assert_eq!(ocean.value, 5.0);
        assert_eq!(ocean.count, 2);
        assert_eq!(ocean.datetime, None);
    }
}
