//! Benchmark orchestration
//!
//! Loads settings, runs the trials for the selected collection and prints the
//! report.

pub mod clock;
pub mod collection;
pub mod config;
pub mod trial_runner;

use std::collections::{HashMap, HashSet};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::{HarnessError, Result};
use crate::ui::cli::CliArgs;
use crate::ui::{export, report};
use clock::MonotonicClock;
use collection::{CollectionKind, CollectionUnderTest, Element};
use config::BenchmarkingParameters;
use trial_runner::{summarize_trials, OperationStats, TrialRunner};

/// Resolve settings from the file and command line, then validate them
pub fn resolve_parameters(args: &CliArgs) -> Result<BenchmarkingParameters> {
    let mut params = BenchmarkingParameters::load(&args.config)?;
    args.apply(&mut params);
    params.validate()?;
    if args.save_config {
        params.save(&args.config)?;
        info!(path = %args.config.display(), "saved settings");
    }
    Ok(params)
}

/// Run every trial for `params` and reduce the series to statistics
///
/// Blocks the calling thread until all runs finish.
pub fn execute(
    params: &BenchmarkingParameters,
    progress: Option<&ProgressBar>,
) -> Result<Vec<OperationStats>> {
    match params.collection {
        CollectionKind::HashSet => execute_for::<HashSet<Element>>(params, progress),
        CollectionKind::HashMap => execute_for::<HashMap<Element, Element>>(params, progress),
    }
}

fn execute_for<K: CollectionUnderTest>(
    params: &BenchmarkingParameters,
    progress: Option<&ProgressBar>,
) -> Result<Vec<OperationStats>> {
    let runner = TrialRunner::from_parameters(MonotonicClock::new(), params);
    let trials = runner.run_many::<K, _>(params.repeat_count, |run| {
        if let Some(pb) = progress {
            pb.set_position(run as u64);
        }
    })?;
    summarize_trials(&trials)
}

fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs {wide_msg}",
            )
            .expect("progress bar template is valid")
            .progress_chars("##-"),
    );
    pb
}

pub async fn run_benchmark(args: CliArgs) -> Result<()> {
    report::print_banner();
    report::print_system_info();

    let params = resolve_parameters(&args)?;
    println!("{}", "Benchmark Parameters".bold().yellow());
    println!("━━━━━━━━━━━━━━━━━━━━");
    println!("{}\n", report::parameters_line(&params));
    info!(
        collection = %params.collection,
        runs = params.repeat_count,
        population = params.population_size,
        elements = params.elements_per_instance,
        lookups = params.lookup_iterations,
        "starting benchmark"
    );

    let pb = if args.no_progress {
        None
    } else {
        Some(progress_bar(params.repeat_count))
    };

    // The whole measurement runs sequentially on one blocking thread
    let task = {
        let params = params.clone();
        let pb = pb.clone();
        tokio::task::spawn_blocking(move || execute(&params, pb.as_ref()))
    };
    let stats = match task.await {
        Ok(result) => result?,
        // a failing collection or clock aborts the whole run
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => return Err(HarnessError::Io(std::io::Error::other(e))),
    };
    if let Some(pb) = pb {
        pb.finish_with_message("completed");
    }
    println!();

    report::print_results(&params, &stats);

    if let Some(path) = &args.csv {
        export::save_csv(path, &stats)?;
        println!("\n{} {}", "✅ Results saved to".green(), path.display());
        info!(path = %path.display(), "exported statistics");
    }
    Ok(())
}
