//! Command-line options

use std::path::PathBuf;

use clap::Parser;

use crate::core::collection::CollectionKind;
use crate::core::config::{BenchmarkingParameters, DEFAULT_SETTINGS_FILE};

/// Micro-benchmark for hash-based collections.
///
/// Every run builds a population of collections, times create, size, lookup,
/// iteration, delete and insert per instance, and reports integer statistics
/// over all runs.
#[derive(Parser, Debug, Clone)]
#[command(version, rename_all = "kebab-case")]
pub struct CliArgs {
    /// Settings file; defaults are used when it does not exist
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Number of runs
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Collection instances per run
    #[arg(short, long)]
    pub population: Option<usize>,

    /// Elements inserted into each instance
    #[arg(short, long)]
    pub elements: Option<usize>,

    /// Repetitions of each lookup sub-benchmark
    #[arg(short, long)]
    pub lookups: Option<usize>,

    #[arg(long, value_enum)]
    pub collection: Option<CollectionKind>,

    /// Also write per-operation statistics to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the merged settings back to the settings file
    #[arg(long)]
    pub save_config: bool,

    #[arg(long)]
    pub no_progress: bool,
}

impl CliArgs {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply(&self, params: &mut BenchmarkingParameters) {
        if let Some(runs) = self.runs {
            params.repeat_count = runs;
        }
        if let Some(population) = self.population {
            params.population_size = population;
        }
        if let Some(elements) = self.elements {
            params.elements_per_instance = elements;
        }
        if let Some(lookups) = self.lookups {
            params.lookup_iterations = lookups;
        }
        if let Some(collection) = self.collection {
            params.collection = collection;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_values() {
        let args = CliArgs::parse_from(["hashbench", "--runs", "2", "--collection", "hash-map"]);
        let mut params = BenchmarkingParameters::default();
        args.apply(&mut params);
        assert_eq!(params.repeat_count, 2);
        assert_eq!(params.collection, CollectionKind::HashMap);
        assert_eq!(params.population_size, 10_000);
        assert_eq!(params.lookup_iterations, 10);
    }

    #[test]
    fn zero_override_is_parsed_and_left_for_validation() {
        let args = CliArgs::parse_from(["hashbench", "-r", "0"]);
        let mut params = BenchmarkingParameters::default();
        args.apply(&mut params);
        assert!(params.validate().is_err());
    }
}
