//! Offline analysis of test-generation coverage experiments.
//!
//! Two batch pipelines share this library. The `plot` binary parses raw
//! coverage logs, reshapes their samples into global time buckets and
//! renders a comparison chart plus a CSV summary of per-bucket means. The
//! `table` binary merges each trial's line/branch summary CSVs and averages
//! them into one combined table.
//!
//! Both pipelines run synchronously and abort on the first malformed input.
#![deny(missing_docs)]

extern crate csv;
#[macro_use]
extern crate error_chain;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate plotters;

pub mod errors;

mod coverage;
pub use coverage::{read_dataset, read_dataset_file, Dataset, LogName, TimeBuckets};

mod stats;
pub use stats::{bucket_means, max_point, mean, median, truncate_to_min};

mod chart;
pub use chart::{box_chart, line_chart};

mod report;
pub use report::write_summary;

mod table;
pub use table::{average_trials, read_trial, write_average, TableHeader, TrialTable};
