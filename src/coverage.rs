//! Parsing of raw coverage logs into per-time-bucket series.
//!
//! A coverage log is plain text: a line containing `TIME` opens the bucket
//! named by its second field, and every following pair of lines is one
//! sample, covered lines then total lines, until the next `TIME` header.

use errors::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Metadata encoded in a coverage-log file name, five fields split on `_`
/// and `.`: `project_experiment_condition_metric.ext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogName {
    /// The bare file name the fields were split from.
    pub file: String,

    /// Project under test.
    pub project: String,

    /// Experiment variant (e.g. `Complete` or `Individual`).
    pub experiment: String,

    /// Condition label, the tool being compared.
    pub condition: String,

    /// Coverage metric (e.g. `Line` or `Branch`).
    pub metric: String,
}

impl LogName {
    /// Splits the file name of `path` into its metadata fields.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<LogName> {
        let file = path.as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        let fields = file.split(|c| c == '_' || c == '.').collect::<Vec<_>>();
        if fields.len() != 5 {
            bail!(ErrorKind::BadLogName(file));
        }

        Ok(LogName {
            project: fields[0].to_string(),
            experiment: fields[1].to_string(),
            condition: fields[2].to_string(),
            metric: fields[3].to_string(),
            file: file,
        })
    }

    /// Title under which this log's outputs are filed.
    pub fn title(&self) -> String {
        format!(
            "{} {} {} Coverage Percentage",
            self.project,
            self.experiment,
            self.metric
        )
    }
}

/// The global ordering of time limits: every distinct limit in order of
/// first appearance across all parsed logs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimeBuckets {
    limits: Vec<u64>,
}

impl TimeBuckets {
    /// Creates an empty ordering.
    pub fn new() -> TimeBuckets {
        TimeBuckets { limits: Vec::new() }
    }

    /// The time limits in order of first appearance.
    pub fn limits(&self) -> &[u64] {
        &self.limits
    }

    /// Number of buckets recorded so far.
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    /// True when no time limit has been recorded.
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// Keeps only the first `len` buckets.
    pub fn truncate(&mut self, len: usize) {
        self.limits.truncate(len);
    }

    /// Position of `limit` in the ordering, appending it first if unseen.
    fn index_of(&mut self, limit: u64) -> usize {
        match self.limits.iter().position(|&t| t == limit) {
            Some(index) => index,
            None => {
                self.limits.push(limit);
                self.limits.len() - 1
            }
        }
    }
}

/// One parsed coverage log: all samples of one experiment condition,
/// reshaped into per-bucket coverage percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Chart and output-file title derived from the log name.
    pub title: String,

    /// Condition label of this log.
    pub condition: String,

    /// Coverage percentages, indexed by global time-bucket position. A
    /// bucket may hold several points when the log repeats sample pairs
    /// under one header.
    pub series: Vec<Vec<f64>>,
}

/// Opens and parses the coverage log at `path`, extending `buckets` with any
/// unseen time limits.
pub fn read_dataset_file<P: AsRef<Path>>(path: P, buckets: &mut TimeBuckets) -> Result<Dataset> {
    let name = LogName::parse(&path)?;
    let file = File::open(&path)
        .chain_err(|| format!("cannot open {}", path.as_ref().display()))?;
    read_dataset(file, &name, buckets)
}

/// Take a reader (file, string, etc.) and reshape its samples into a
/// `Dataset`. The first malformed line aborts the run.
pub fn read_dataset<R: Read>(mut rdr: R, name: &LogName, buckets: &mut TimeBuckets) -> Result<Dataset> {
    let mut contents = String::new();
    rdr.read_to_string(&mut contents)?;
    let lines = contents.lines().map(|l| l.trim()).collect::<Vec<_>>();

    let mut series: Vec<Vec<f64>> = Vec::new();
    let mut current = None;

    let mut i = 0;
    while i < lines.len() {
        let mut line = lines[i];

        if line.contains("TIME") {
            let field = match line.split_whitespace().nth(1) {
                Some(field) => field,
                None => bail!(ErrorKind::BadTimeMarker(line.to_string())),
            };
            let limit = field.parse::<u64>()
                .chain_err(|| ErrorKind::BadTimeMarker(line.to_string()))?;

            let index = buckets.index_of(limit);
            while series.len() <= index {
                series.push(Vec::new());
            }
            current = Some(index);
            trace!("{}: TIME {} -> bucket {}", name.file, limit, index);

            i += 1;
            line = match lines.get(i) {
                Some(&next) => next,
                None => bail!(ErrorKind::TruncatedSample(name.file.clone())),
            };
        }

        let index = match current {
            Some(index) => index,
            None => bail!(ErrorKind::MissingTimeMarker(name.file.clone())),
        };

        let covered = line.parse::<f64>()?;
        let total = match lines.get(i + 1) {
            Some(next) => next.parse::<u64>()?,
            None => bail!(ErrorKind::TruncatedSample(name.file.clone())),
        };
        if total == 0 {
            bail!(ErrorKind::ZeroTotal(buckets.limits[index]));
        }

        series[index].push(covered * 100.0 / total as f64);
        i += 2;
    }

    debug!("{}: {} buckets", name.file, series.len());
    Ok(Dataset {
        title: name.title(),
        condition: name.condition.clone(),
        series: series,
    })
}
