//! Small numeric helpers shared by the analysis pipelines.

use coverage::{Dataset, TimeBuckets};
use itertools::Itertools;

/// Arithmetic mean of `samples`, truncated (not rounded) to two decimal
/// places.
pub fn mean(samples: &[f64]) -> f64 {
    assert!(!samples.is_empty());
    let sum = samples.iter().sum::<f64>();
    (100.0 * sum / samples.len() as f64).trunc() / 100.0
}

/// Median of `samples`: the middle element of the sorted values, or the
/// average of the two elements straddling the midpoint for an even count.
pub fn median(samples: &[f64]) -> f64 {
    assert!(!samples.is_empty());
    let sorted = samples
        .iter()
        .cloned()
        .sorted_by(|a, b| a.partial_cmp(b).unwrap())
        .collect::<Vec<_>>();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Largest value across a set of series. Zero when everything is empty.
pub fn max_point(series: &[Vec<f64>]) -> f64 {
    series
        .iter()
        .flat_map(|s| s.iter().cloned())
        .fold(0.0, f64::max)
}

/// Per-bucket means for every dataset, in bucket order.
pub fn bucket_means(datasets: &[Dataset]) -> Vec<Vec<f64>> {
    datasets
        .iter()
        .map(|d| d.series.iter().map(|bucket| mean(bucket)).collect())
        .collect()
}

/// Cuts every dataset and the global bucket ordering down to the shortest
/// dataset, counted in buckets. Bucket identity is assumed aligned by
/// position across datasets and is not checked.
pub fn truncate_to_min(datasets: &mut [Dataset], buckets: &mut TimeBuckets) {
    let min = datasets.iter().map(|d| d.series.len()).min().unwrap_or(0);
    buckets.truncate(min);
    for dataset in datasets.iter_mut() {
        dataset.series.truncate(min);
    }
    debug!("datasets truncated to {} buckets", min);
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverage::{read_dataset, LogName, TimeBuckets};

    #[test]
    fn median_of_odd_count_is_the_middle_element() {
        assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn median_of_even_count_pairs_the_midpoint() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[10.0, 20.0]), 15.0);
    }

    #[test]
    fn mean_truncates_to_two_decimals() {
        assert_eq!(mean(&[1.0, 2.0]), 1.5);
        // 100/3 = 33.333... truncates, never rounds up.
        assert_eq!(mean(&[100.0 / 3.0; 3]), 33.33);
    }

    #[test]
    fn max_point_spans_all_series() {
        let series = vec![vec![1.0, 7.0], vec![], vec![3.0]];
        assert_eq!(max_point(&series), 7.0);
        assert_eq!(max_point(&[]), 0.0);
    }

    #[test]
    fn truncation_matches_the_shortest_dataset() {
        let name_a = LogName::parse("P_Complete_Randoop_Line.txt").unwrap();
        let name_b = LogName::parse("P_Complete_DigDog_Line.txt").unwrap();

        let mut buckets = TimeBuckets::new();
        let long = "TIME 5\n50\n100\nTIME 10\n60\n100\nTIME 15\n70\n100\n";
        let short = "TIME 5\n40\n100\nTIME 10\n45\n100\n";
        let mut datasets = vec![
            read_dataset(long.as_bytes(), &name_a, &mut buckets).unwrap(),
            read_dataset(short.as_bytes(), &name_b, &mut buckets).unwrap(),
        ];

        truncate_to_min(&mut datasets, &mut buckets);

        assert_eq!(buckets.limits(), &[5, 10]);
        assert_eq!(datasets[0].series.len(), 2);
        assert_eq!(datasets[1].series.len(), 2);
    }

    #[test]
    fn means_follow_bucket_positions() {
        let name = LogName::parse("P_Complete_Randoop_Line.txt").unwrap();
        let mut buckets = TimeBuckets::new();
        let log = "TIME 5\n50\n100\n80\n100\nTIME 10\n90\n100\n";
        let datasets = vec![read_dataset(log.as_bytes(), &name, &mut buckets).unwrap()];

        assert_eq!(bucket_means(&datasets), vec![vec![65.0, 90.0]]);
    }
}
