//! CSV export of per-operation statistics

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::trial_runner::OperationStats;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct StatsRow<'a> {
    operation: &'a str,
    runs: usize,
    calls_per_run: usize,
    sum_ns: u128,
    average_ns: u64,
    std_dev_ns: u64,
    min_ns: u64,
    max_ns: u64,
    per_call_ns: u64,
}

/// Write one row per operation to `writer`
pub fn write_csv<W: Write>(writer: W, stats: &[OperationStats]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in stats {
        let s = &row.stats;
        wtr.serialize(StatsRow {
            operation: row.operation.name(),
            runs: s.count,
            calls_per_run: row.samples_per_run,
            sum_ns: s.sum,
            average_ns: s.average,
            std_dev_ns: s.std_dev,
            min_ns: s.minimum,
            max_ns: s.maximum,
            per_call_ns: row.per_call_average(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_csv(path: &Path, stats: &[OperationStats]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), stats)
}
