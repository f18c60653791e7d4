pub struct StatsHelper;

impl StatsHelper {
    /// Arithmetic mean. NaN when `samples` is empty or holds a NaN.
    pub fn mean(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return f64::NAN;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Population standard deviation (divides by N), NaN-propagating like `mean`.
    pub fn std_dev(samples: &[f64]) -> f64 {
        let mean = Self::mean(samples);
        if mean.is_nan() {
            return f64::NAN;
        }
        let sum_sq: f64 = samples.iter().map(|&v| (v - mean) * (v - mean)).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    /// Largest value; NaN entries are skipped. `None` for an empty slice.
    pub fn peak(samples: &[f64]) -> Option<f64> {
        samples
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }

    /// Median, averaging the two middle values for even lengths.
    ///
    /// Undefined (`None`) for an empty slice or one containing NaN.
    pub fn median(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() || samples.iter().any(|v| v.is_nan()) {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) * 0.5)
        } else {
            Some(sorted[mid])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_dev_of_empty_sequence_are_nan() {
        assert!(StatsHelper::mean(&[]).is_nan());
        assert!(StatsHelper::std_dev(&[]).is_nan());
    }

    #[test]
    fn std_dev_divides_by_population_size() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(StatsHelper::mean(&samples), 5.0);
        assert_eq!(StatsHelper::std_dev(&samples), 2.0);
    }

    #[test]
    fn statistics_propagate_nan() {
        let samples = [1.0, f64::NAN, 3.0];
        assert!(StatsHelper::mean(&samples).is_nan());
        assert!(StatsHelper::std_dev(&samples).is_nan());
    }

    #[test]
    fn median_prefers_middle_value_over_outliers() {
        let epochs = [10.0, 20.0, 30.0, 40.0, 1_000_000.0];
        assert_eq!(StatsHelper::median(&epochs), Some(30.0));
        assert_eq!(StatsHelper::median(&[40.0, 10.0, 30.0, 20.0]), Some(25.0));
        assert_eq!(StatsHelper::median(&[]), None);
        assert_eq!(StatsHelper::median(&[1.0, f64::NAN]), None);
    }

    #[test]
    fn peak_skips_nan() {
        assert_eq!(StatsHelper::peak(&[1.0, f64::NAN, 3.0]), Some(3.0));
        assert_eq!(StatsHelper::peak(&[]), None);
    }
}
