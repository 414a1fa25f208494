//! Averaging of pre-aggregated per-trial coverage tables.
//!
//! Each trial leaves behind a pair of summary CSVs, one for line coverage
//! and one for branch coverage, with the same time column and condition
//! columns. The pair merges into one table per trial; the tables truncate
//! to the shortest and reduce to their unweighted element-wise mean.

use csv;
use errors::*;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Header labels shared by one trial's line/branch CSV pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    /// Label of the time column.
    pub time_label: String,

    /// Condition labels, one per coverage column.
    pub conditions: Vec<String>,
}

impl TableHeader {
    /// First output header row: the time label, `Line Coverage (%)` over
    /// the first line-coverage column and `Branch Coverage (%)` over the
    /// first branch-coverage column, blanks elsewhere.
    pub fn coverage_row(&self) -> Vec<String> {
        let mut row = vec![self.time_label.clone()];
        for metric in &["Line Coverage (%)", "Branch Coverage (%)"] {
            for index in 0..self.conditions.len() {
                row.push(if index == 0 {
                    metric.to_string()
                } else {
                    String::new()
                });
            }
        }
        row
    }

    /// Second output header row: a blank over the time column, then the
    /// condition labels once for the line block and once for the branch
    /// block, with the trailing empty field.
    pub fn condition_row(&self) -> Vec<String> {
        let mut row = vec![String::new()];
        for _ in 0..2 {
            row.extend(self.conditions.iter().cloned());
        }
        row.push(String::new());
        row
    }
}

/// One trial's merged line + branch coverage table.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialTable {
    /// Labels from the trial's line-coverage header row.
    pub header: TableHeader,

    /// Rows: time value, line coverage per condition, then branch coverage
    /// per condition.
    pub rows: Vec<Vec<f64>>,
}

/// Reads and merges the line/branch CSV pair named by `prefix`.
pub fn read_trial(prefix: &str) -> Result<TrialTable> {
    let line_path = format!("{} Line Coverage Percentage.csv", prefix);
    let branch_path = format!("{} Branch Coverage Percentage.csv", prefix);

    let line_file = fs::File::open(&line_path)
        .chain_err(|| format!("cannot open {}", line_path))?;
    let branch_file = fs::File::open(&branch_path)
        .chain_err(|| format!("cannot open {}", branch_path))?;

    let line = read_rows(line_file, &line_path)?;
    let branch = read_rows(branch_file, &branch_path)?;
    merge_trial(prefix, line, branch)
}

/// Reads a summary CSV into its header labels and numeric body, dropping
/// the trailing empty field of every row.
fn read_rows<R: Read>(rdr: R, origin: &str) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => strip_trailing(&record?),
        None => bail!(ErrorKind::EmptyTable(origin.to_string())),
    };

    let mut rows = Vec::new();
    for record in records {
        let mut row = Vec::new();
        for field in strip_trailing(&record?) {
            row.push(field.parse::<f64>()?);
        }
        rows.push(row);
    }
    Ok((header, rows))
}

fn strip_trailing(record: &csv::StringRecord) -> Vec<String> {
    let mut fields = record.iter().map(str::to_string).collect::<Vec<_>>();
    if fields.last().map_or(false, |f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Merges one trial's line and branch tables: each body row is the line row
/// (time included) followed by the branch row with its time dropped. Column
/// layout across the pair is assumed identical and is not checked.
fn merge_trial(
    prefix: &str,
    line: (Vec<String>, Vec<Vec<f64>>),
    branch: (Vec<String>, Vec<Vec<f64>>),
) -> Result<TrialTable> {
    let (header, line_rows) = line;
    let (_, branch_rows) = branch;

    if header.is_empty() {
        bail!(ErrorKind::EmptyTable(prefix.to_string()));
    }
    let time_label = header[0].clone();
    let conditions = header[1..].to_vec();

    let mut rows = Vec::with_capacity(line_rows.len());
    for (index, line_row) in line_rows.into_iter().enumerate() {
        let branch_row = match branch_rows.get(index) {
            Some(row) => row,
            None => bail!(ErrorKind::ShortBranchFile(prefix.to_string(), index)),
        };

        let mut row = line_row;
        row.extend(branch_row.iter().skip(1).cloned());
        rows.push(row);
    }

    debug!("{}: {} rows, {} conditions", prefix, rows.len(), conditions.len());
    Ok(TrialTable {
        header: TableHeader {
            time_label: time_label,
            conditions: conditions,
        },
        rows: rows,
    })
}

/// Truncates all trials to the shortest row count and returns their
/// element-wise unweighted mean. The header comes from the first trial.
pub fn average_trials(mut trials: Vec<TrialTable>) -> Result<TrialTable> {
    if trials.is_empty() {
        bail!(ErrorKind::NoInput);
    }

    let min = trials.iter().map(|t| t.rows.len()).min().unwrap_or(0);
    for trial in trials.iter_mut() {
        trial.rows.truncate(min);
    }

    let count = trials.len() as f64;
    let mut combined = trials.remove(0);
    for trial in &trials {
        for (row, other) in combined.rows.iter_mut().zip(trial.rows.iter()) {
            for (cell, value) in row.iter_mut().zip(other.iter()) {
                *cell += *value;
            }
        }
    }
    for row in combined.rows.iter_mut() {
        for cell in row.iter_mut() {
            *cell /= count;
        }
    }

    Ok(combined)
}

/// Writes the combined table with its two header rows; body cells are
/// integer-truncated, rows keep the trailing empty field.
pub fn write_average<P: AsRef<Path>>(path: P, table: &TrialTable) -> Result<()> {
    // Clear the previous run's output. Absence is fine.
    let _ = fs::remove_file(path.as_ref());

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())?;

    writer.write_record(&table.header.coverage_row())?;
    writer.write_record(&table.header.condition_row())?;

    for row in &table.rows {
        let mut record = row.iter()
            .map(|&cell| format!("{}", cell as i64))
            .collect::<Vec<_>>();
        record.push(String::new());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    debug!("combined table saved to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &'static str = "Time,Randoop,Orienteering,\n5,10,20,\n10,12,22,\n";
    const BRANCH: &'static str = "Time,Randoop,Orienteering,\n5,30,40,\n10,32,42,\n";

    fn trial(prefix: &str, line: &str, branch: &str) -> TrialTable {
        let line = read_rows(line.as_bytes(), "line").unwrap();
        let branch = read_rows(branch.as_bytes(), "branch").unwrap();
        merge_trial(prefix, line, branch).unwrap()
    }

    #[test]
    fn pair_merges_with_the_branch_time_dropped() {
        let table = trial("t1", LINE, BRANCH);

        assert_eq!(table.header.time_label, "Time");
        assert_eq!(table.header.conditions, vec!["Randoop", "Orienteering"]);
        assert_eq!(
            table.rows,
            vec![
                vec![5.0, 10.0, 20.0, 30.0, 40.0],
                vec![10.0, 12.0, 22.0, 32.0, 42.0],
            ]
        );
    }

    #[test]
    fn short_branch_file_aborts() {
        let line = read_rows(LINE.as_bytes(), "line").unwrap();
        let branch = read_rows("Time,Randoop,Orienteering,\n5,30,40,\n".as_bytes(), "branch")
            .unwrap();

        match *merge_trial("t1", line, branch).unwrap_err().kind() {
            ErrorKind::ShortBranchFile(_, row) => assert_eq!(row, 1),
            ref other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn averaging_one_trial_is_the_identity() {
        let table = trial("t1", LINE, BRANCH);
        let combined = average_trials(vec![table.clone()]).unwrap();

        assert_eq!(combined.rows, table.rows);
        assert_eq!(combined.header, table.header);
    }

    #[test]
    fn trials_average_cell_by_cell() {
        let a = trial("t1", "Time,Randoop,\n5,10,\n", "Time,Randoop,\n5,20,\n");
        let b = trial("t2", "Time,Randoop,\n5,30,\n", "Time,Randoop,\n5,40,\n");

        let combined = average_trials(vec![a, b]).unwrap();
        assert_eq!(combined.rows, vec![vec![5.0, 20.0, 30.0]]);
    }

    #[test]
    fn trials_truncate_to_the_shortest() {
        let long = trial("t1", LINE, BRANCH);
        let short = trial(
            "t2",
            "Time,Randoop,Orienteering,\n5,20,30,\n",
            "Time,Randoop,Orienteering,\n5,40,50,\n",
        );

        let combined = average_trials(vec![long, short]).unwrap();
        assert_eq!(combined.rows, vec![vec![5.0, 15.0, 25.0, 35.0, 45.0]]);
    }

    #[test]
    fn no_trials_is_an_error() {
        match *average_trials(Vec::new()).unwrap_err().kind() {
            ErrorKind::NoInput => {}
            ref other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn header_rows_interleave_metric_and_condition_labels() {
        let table = trial("t1", LINE, BRANCH);

        assert_eq!(
            table.header.coverage_row(),
            vec!["Time", "Line Coverage (%)", "", "Branch Coverage (%)", ""]
        );
        assert_eq!(
            table.header.condition_row(),
            vec!["", "Randoop", "Orienteering", "Randoop", "Orienteering", ""]
        );
    }
}
