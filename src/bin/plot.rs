//! Aggregates raw coverage logs into a comparison chart and a CSV summary.
//!
//! Each input file holds one experiment condition. Samples group into the
//! global time-bucket ordering, every dataset truncates to the shortest,
//! and the run leaves a PNG (box plots, or mean polylines with `--line`)
//! plus a CSV of per-bucket means.

extern crate chrono;
extern crate coverage_eval;
extern crate env_logger;
extern crate structopt;

use coverage_eval::errors::*;
use coverage_eval::{box_chart, bucket_means, line_chart, read_dataset_file, truncate_to_min,
                    write_summary, TimeBuckets};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "plot")]
#[structopt(about = "Aggregate coverage logs into a chart and a CSV summary.")]
struct Opt {
    /// Coverage-log files, one per experiment condition.
    #[structopt(required = true)]
    files: Vec<String>,

    /// Draw a line chart of per-bucket means instead of box plots.
    #[structopt(short = "l", long = "line")]
    line: bool,

    /// Compare against small tests: route outputs under smalltestData/ and
    /// tag the first series label.
    #[structopt(short = "s")]
    small_test: bool,
}

fn main() {
    init_logger();

    let opt = Opt::from_args();
    if let Err(ref e) = run(&opt) {
        let stderr = &mut ::std::io::stderr();
        writeln!(stderr, "error: {}", e).expect("failed to write to stderr");
        for cause in e.iter().skip(1) {
            writeln!(stderr, "caused by: {}", cause).expect("failed to write to stderr");
        }
        ::std::process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<()> {
    let mut buckets = TimeBuckets::new();
    let mut datasets = Vec::new();
    for file in &opt.files {
        println!("reading {}", file);
        datasets.push(read_dataset_file(file, &mut buckets)?);
    }
    if datasets.is_empty() {
        return Err(ErrorKind::NoInput.into());
    }

    truncate_to_min(&mut datasets, &mut buckets);

    let title = datasets[0].title.clone();
    let mut labels = datasets
        .iter()
        .map(|d| d.condition.clone())
        .collect::<Vec<_>>();
    if opt.small_test {
        labels[0] = format!("{}+small-tests", labels[0]);
    }

    let means = bucket_means(&datasets);
    let root = if opt.small_test {
        PathBuf::from("smalltestData")
    } else {
        PathBuf::new()
    };

    let plot_dir = root.join("plots");
    fs::create_dir_all(&plot_dir)?;
    let png = plot_dir.join(format!("{}.png", title));
    if opt.line {
        line_chart(&png, &title, &labels, &buckets, &means)?;
    } else {
        box_chart(&png, &title, &labels, &buckets, &datasets)?;
    }

    let csv_dir = root.join("csv");
    fs::create_dir_all(&csv_dir)?;
    write_summary(csv_dir.join(format!("{}.csv", title)), &labels, &buckets, &means)?;

    Ok(())
}

fn init_logger() {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format(|buf, record| {
        let t = chrono::Utc::now();
        writeln!(
            buf,
            "{} {}:{}: {}",
            t.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });
    builder.init();
}
