//! Text report printed at the end of a benchmark

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use sysinfo::System;

use crate::core::config::BenchmarkingParameters;
use crate::core::trial_runner::OperationStats;
use crate::utils::helpers::{group_digits, pad_nanos, separator};

const REPORT_WIDTH: usize = 60;

/// Title block
pub fn print_banner() {
    let rule = separator(REPORT_WIDTH);
    println!("\n{}", rule);
    let title = format!("Hash Collection Benchmark v{}", crate::VERSION);
    println!("{:^60}", title.as_str().bold().cyan());
    println!("{}\n", rule);
}

/// Host information shown above the results
pub fn print_system_info() {
    println!("{}", "System Information".bold().yellow());
    println!("━━━━━━━━━━━━━━━━━━━");

    let os = os_info::get();
    println!("OS:  {} ({})", os, os.bitness());

    let mut sys = System::new();
    sys.refresh_cpu_all();
    let brand = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    println!("CPU: {} ({} logical cores)", brand, sys.cpus().len());
    println!();
}

/// One-line description of the benchmark dimensions
pub fn parameters_line(params: &BenchmarkingParameters) -> String {
    format!(
        "{}: {} x {} elements | Lookups: {}x | Runs: {}",
        params.collection.label(),
        params.population_size,
        params.elements_per_instance,
        params.lookup_iterations,
        params.repeat_count,
    )
}

/// Statistics table, one row per operation, values in integer nanoseconds
///
/// Avg, StdDev, Min and Max describe the per-run sums; the last column is the
/// mean of a single call.
pub fn render_table(stats: &[OperationStats]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Operation",
            "Avg (ns)",
            "StdDev (ns)",
            "Min (ns)",
            "Max (ns)",
            "Per call (ns)",
        ]);

    for row in stats {
        let s = &row.stats;
        table.add_row(vec![
            Cell::new(row.operation.name()),
            Cell::new(group_digits(s.average)),
            Cell::new(group_digits(s.std_dev)),
            Cell::new(group_digits(s.minimum)),
            Cell::new(group_digits(s.maximum)),
            Cell::new(group_digits(row.per_call_average())),
        ]);
    }
    for i in 1..6 {
        if let Some(column) = table.column_mut(i) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table.to_string()
}

/// Summed time per operation over all runs, one padded line each
pub fn render_totals(stats: &[OperationStats]) -> String {
    stats
        .iter()
        .map(|row| format!("{:<11}: {}", row.operation.name(), pad_nanos(row.stats.sum, 15)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the full results section
pub fn print_results(params: &BenchmarkingParameters, stats: &[OperationStats]) {
    println!("{}", "Results".bold().yellow());
    println!("━━━━━━━");
    println!("{}", parameters_line(params));
    println!("{}", render_table(stats));
    println!();
    println!("{}", "Totals".bold().yellow());
    println!("{}", "-".repeat(40));
    println!("{}", render_totals(stats));
}
