//! Summary CSV output for the plot pipeline.

use coverage::TimeBuckets;
use csv;
use errors::*;
use std::fs;
use std::path::Path;

/// Writes the per-bucket means as a `Time` column plus one column per
/// condition. Every row ends with an empty field, the trailing-comma
/// convention the averager strips back off on input.
pub fn write_summary<P: AsRef<Path>>(
    path: P,
    labels: &[String],
    buckets: &TimeBuckets,
    means: &[Vec<f64>],
) -> Result<()> {
    // Clear the previous run's output. Absence is fine.
    let _ = fs::remove_file(path.as_ref());

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut header = vec!["Time".to_string()];
    header.extend(labels.iter().cloned());
    header.push(String::new());
    writer.write_record(&header)?;

    for (index, limit) in buckets.limits().iter().enumerate() {
        let mut row = vec![limit.to_string()];
        for series in means {
            row.push(series[index].to_string());
        }
        row.push(String::new());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    debug!("summary saved to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverage::{read_dataset, LogName, TimeBuckets};
    use stats::bucket_means;
    use std::env;
    use std::fs;

    #[test]
    fn summary_rows_follow_the_bucket_ordering() {
        let name = LogName::parse("Gson_Complete_Randoop_Line.txt").unwrap();
        let mut buckets = TimeBuckets::new();
        let log = "TIME 5\n50\n100\n80\n100\nTIME 10\n90\n100\n";
        let datasets = vec![read_dataset(log.as_bytes(), &name, &mut buckets).unwrap()];
        let means = bucket_means(&datasets);

        let path = env::temp_dir().join("coverage-eval-summary-test.csv");
        write_summary(&path, &["Randoop".to_string()], &buckets, &means).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(contents, "Time,Randoop,\n5,65,\n10,90,\n");
    }
}
