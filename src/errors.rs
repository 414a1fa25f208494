//! Error types for the coverage analysis pipelines.

error_chain! {
    errors {
        BadLogName(name: String) {
            description("log file name does not encode experiment metadata")
            display(
                "cannot split '{}' into project, experiment, condition and metric",
                name
            )
        }
        BadTimeMarker(line: String) {
            description("TIME marker without an integer time limit")
            display("cannot read a time limit from '{}'", line)
        }
        MissingTimeMarker(file: String) {
            description("coverage sample appears before any TIME marker")
            display("'{}' holds coverage samples before any TIME marker", file)
        }
        TruncatedSample(file: String) {
            description("covered-lines count without a total-lines count")
            display("'{}' ends in the middle of a sample pair", file)
        }
        ZeroTotal(limit: u64) {
            description("total line count of zero")
            display("total line count is zero at time limit {}", limit)
        }
        EmptyTable(file: String) {
            description("aggregated CSV has no header row")
            display("'{}' has no header row", file)
        }
        ShortBranchFile(prefix: String, row: usize) {
            description("branch file has fewer rows than its line file")
            display("branch file for '{}' has no row {}", prefix, row)
        }
        NoInput {
            description("no input files given")
        }
        Chart(detail: String) {
            description("chart rendering failed")
            display("chart rendering failed: {}", detail)
        }
    }

    foreign_links {
        Csv(::csv::Error);
        Io(::std::io::Error);
        ParseFloat(::std::num::ParseFloatError);
        ParseInt(::std::num::ParseIntError);
    }
}
