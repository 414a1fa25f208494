//! Averages per-trial summary CSVs into one combined table.
//!
//! Each positional argument is a trial prefix naming a line/branch CSV
//! pair. The merged tables truncate to the shortest and reduce to their
//! unweighted mean, written to `csv/Average.csv`.

extern crate chrono;
extern crate coverage_eval;
extern crate env_logger;
extern crate structopt;

use coverage_eval::errors::*;
use coverage_eval::{average_trials, read_trial, write_average};
use std::fs;
use std::io::Write;
use std::path::Path;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "table")]
#[structopt(about = "Average per-trial coverage tables into one CSV.")]
struct Opt {
    /// Trial prefixes, each naming `<prefix> Line Coverage Percentage.csv`
    /// and `<prefix> Branch Coverage Percentage.csv`.
    #[structopt(required = true)]
    prefixes: Vec<String>,
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
    let mut trials = Vec::new();
    for prefix in &opt.prefixes {
        println!("reading {}", prefix);
        trials.push(read_trial(prefix)?);
    }

    let combined = average_trials(trials)?;

    fs::create_dir_all("csv")?;
    write_average(Path::new("csv").join("Average.csv"), &combined)?;

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
