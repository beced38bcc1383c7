//! Timed-trial runner
//!
//! Builds a population of collections, times each sub-benchmark per instance
//! and folds the per-instance samples into one aggregate sample per operation
//! and run. Repeating that gives one [`SampleSeries`] per operation, which is
//! then reduced with [`summarize`].

use std::collections::BTreeMap;
use std::fmt;
use std::hint::black_box;
use std::ops::Index;

use tracing::debug;

use crate::core::clock::Clock;
use crate::core::collection::{CollectionUnderTest, Element};
use crate::core::config::{validate_dimensions, BenchmarkingParameters};
use crate::error::Result;
use crate::stats::{summarize, AggregateStats, Sample, SampleSeries};

/// Sub-benchmarks executed by every run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    CreateAdd,
    Size,
    HasHit,
    HasMiss,
    ForEach,
    Delete,
    AddGrow,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::CreateAdd,
        Operation::Size,
        Operation::HasHit,
        Operation::HasMiss,
        Operation::ForEach,
        Operation::Delete,
        Operation::AddGrow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateAdd => "create+add",
            Operation::Size => "size",
            Operation::HasHit => "has (hit)",
            Operation::HasMiss => "has (miss)",
            Operation::ForEach => "forEach",
            Operation::Delete => "delete",
            Operation::AddGrow => "add (grow)",
        }
    }

    /// Whether the step needs an element already present in each instance
    pub fn needs_members(&self) -> bool {
        matches!(self, Operation::HasHit | Operation::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate samples of a single run, keyed by operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    totals: BTreeMap<Operation, Sample>,
    sample_counts: BTreeMap<Operation, usize>,
}

impl RunResult {
    fn record(&mut self, operation: Operation, series: &SampleSeries) -> Result<()> {
        self.totals.insert(operation, series.total()?);
        self.sample_counts.insert(operation, series.len());
        Ok(())
    }

    /// Summed elapsed time of `operation` across the population
    pub fn total(&self, operation: Operation) -> Option<Sample> {
        self.totals.get(&operation).copied()
    }

    /// Number of individual measurements folded into [`RunResult::total`]
    pub fn sample_count(&self, operation: Operation) -> usize {
        self.sample_counts.get(&operation).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operation, Sample)> + '_ {
        self.totals.iter().map(|(&op, &total)| (op, total))
    }
}

/// Per-operation series collected over many runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialSeries {
    series: BTreeMap<Operation, SampleSeries>,
    samples_per_run: BTreeMap<Operation, usize>,
}

impl TrialSeries {
    fn append(&mut self, result: &RunResult) {
        for (op, total) in result.iter() {
            self.series.entry(op).or_default().push(total);
            self.samples_per_run.insert(op, result.sample_count(op));
        }
    }

    pub fn get(&self, operation: Operation) -> Option<&SampleSeries> {
        self.series.get(&operation)
    }

    /// Individual measurements behind each aggregate sample of `operation`
    pub fn samples_per_run(&self, operation: Operation) -> usize {
        self.samples_per_run.get(&operation).copied().unwrap_or(0)
    }

    /// Number of operations that were timed
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operation, &SampleSeries)> + '_ {
        self.series.iter().map(|(&op, series)| (op, series))
    }
}

impl Index<&Operation> for TrialSeries {
    type Output = SampleSeries;

    fn index(&self, operation: &Operation) -> &SampleSeries {
        &self.series[operation]
    }
}

/// Statistics of one operation across all runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationStats {
    pub operation: Operation,
    /// Statistics over the per-run sums
    pub stats: AggregateStats,
    pub samples_per_run: usize,
}

impl OperationStats {
    /// Mean time of a single invocation, floor of sum over every measurement
    pub fn per_call_average(&self) -> Sample {
        let calls = self.stats.count as u128 * self.samples_per_run as u128;
        if calls == 0 {
            return 0;
        }
        // never above the largest per-run sum, so it fits a u64
        (self.stats.sum / calls) as Sample
    }
}

/// Drives repeated runs of the benchmark body against one clock
#[derive(Debug, Clone)]
pub struct TrialRunner<C: Clock> {
    clock: C,
    population_size: usize,
    elements_per_instance: usize,
    lookup_iterations: usize,
}

impl<C: Clock> TrialRunner<C> {
    pub fn new(
        clock: C,
        population_size: usize,
        elements_per_instance: usize,
        lookup_iterations: usize,
    ) -> Self {
        Self {
            clock,
            population_size,
            elements_per_instance,
            lookup_iterations,
        }
    }

    pub fn from_parameters(clock: C, params: &BenchmarkingParameters) -> Self {
        Self::new(
            clock,
            params.population_size,
            params.elements_per_instance,
            params.lookup_iterations,
        )
    }

    /// Operations timed by each run
    ///
    /// Empty instances have no member to hit or delete, so those two steps
    /// are left out when no elements are inserted.
    pub fn operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.elements_per_instance > 0 || !op.needs_members())
            .collect()
    }

    /// Time a single invocation of `operation`
    ///
    /// Only two clock reads surround the call. A panic inside `operation`
    /// propagates and no sample is produced.
    pub fn measure<T, F: FnOnce() -> T>(&self, operation: F) -> Sample {
        self.measure_with(operation).1
    }

    /// Like [`TrialRunner::measure`], but hands back the operation's output
    pub fn measure_with<T, F: FnOnce() -> T>(&self, operation: F) -> (T, Sample) {
        let start = self.clock.now();
        let output = black_box(operation());
        let end = self.clock.now();
        (output, end.saturating_sub(start))
    }

    /// One full pass over a freshly built population
    pub fn run_once<K: CollectionUnderTest>(&self) -> Result<RunResult> {
        self.validate(1)?;

        let mut result = RunResult::default();
        let mut population: Vec<K> = Vec::with_capacity(self.population_size);

        for op in self.operations() {
            let mut series = SampleSeries::with_capacity(self.population_size);
            match op {
                Operation::CreateAdd => self.bench_create(&mut population, &mut series),
                Operation::Size => self.bench_size(&population, &mut series),
                Operation::HasHit => self.bench_has_hit(&population, &mut series),
                Operation::HasMiss => self.bench_has_miss(&population, &mut series),
                Operation::ForEach => {
                    let visited = self.bench_for_each(&population, &mut series);
                    debug!(visited, "traversal visited elements");
                }
                Operation::Delete => self.bench_delete(&mut population, &mut series),
                Operation::AddGrow => self.bench_add_grow(&mut population, &mut series),
            }
            result.record(op, &series)?;
        }
        Ok(result)
    }

    /// Run the benchmark body `repeats` times
    ///
    /// `on_run` is called with the number of completed runs after each one.
    /// Configuration is validated before anything is measured.
    pub fn run_many<K, F>(&self, repeats: usize, mut on_run: F) -> Result<TrialSeries>
    where
        K: CollectionUnderTest,
        F: FnMut(usize),
    {
        self.validate(repeats)?;

        let mut trials = TrialSeries::default();
        for run in 1..=repeats {
            let result = self.run_once::<K>()?;
            trials.append(&result);
            debug!(run, repeats, "run completed");
            on_run(run);
        }
        Ok(trials)
    }

    fn validate(&self, repeats: usize) -> Result<()> {
        validate_dimensions(
            repeats,
            self.population_size,
            self.elements_per_instance,
            self.lookup_iterations,
        )
    }

    fn elements(&self) -> Element {
        // validated to fit alongside the whole population
        self.elements_per_instance as Element
    }

    fn bench_create<K: CollectionUnderTest>(
        &self,
        population: &mut Vec<K>,
        series: &mut SampleSeries,
    ) {
        let e = self.elements();
        for i in 0..self.population_size as Element {
            let (instance, sample) = self.measure_with(|| {
                let mut c = K::create();
                for j in 0..e {
                    c.insert(i * e + j);
                }
                c
            });
            population.push(instance);
            series.push(sample);
        }
    }

    fn bench_size<K: CollectionUnderTest>(&self, population: &[K], series: &mut SampleSeries) {
        for c in population {
            series.push(self.measure(|| c.size()));
        }
    }

    fn bench_has_hit<K: CollectionUnderTest>(
        &self,
        population: &[K],
        series: &mut SampleSeries,
    ) {
        let e = self.elements();
        for _ in 0..self.lookup_iterations {
            for (i, c) in population.iter().enumerate() {
                let key = i as Element * e + e / 2;
                series.push(self.measure(|| c.contains(key)));
            }
        }
    }

    fn bench_has_miss<K: CollectionUnderTest>(
        &self,
        population: &[K],
        series: &mut SampleSeries,
    ) {
        for _ in 0..self.lookup_iterations {
            for (i, c) in population.iter().enumerate() {
                let key = -1 - i as Element;
                series.push(self.measure(|| c.contains(key)));
            }
        }
    }

    fn bench_for_each<K: CollectionUnderTest>(
        &self,
        population: &[K],
        series: &mut SampleSeries,
    ) -> usize {
        let mut visited = 0usize;
        for c in population {
            series.push(self.measure(|| c.traverse(|_| visited += 1)));
        }
        visited
    }

    fn bench_delete<K: CollectionUnderTest>(
        &self,
        population: &mut [K],
        series: &mut SampleSeries,
    ) {
        let e = self.elements();
        for (i, c) in population.iter_mut().enumerate() {
            let key = i as Element * e;
            series.push(self.measure(|| c.delete(key)));
        }
    }

    fn bench_add_grow<K: CollectionUnderTest>(
        &self,
        population: &mut [K],
        series: &mut SampleSeries,
    ) {
        let base = self.population_size as Element * self.elements();
        for (i, c) in population.iter_mut().enumerate() {
            let key = base + i as Element;
            series.push(self.measure(|| c.insert(key)));
        }
    }
}

/// Reduce every collected series, in operation order
pub fn summarize_trials(trials: &TrialSeries) -> Result<Vec<OperationStats>> {
    trials
        .iter()
        .map(|(operation, series)| {
            summarize(series).map(|stats| OperationStats {
                operation,
                stats,
                samples_per_run: trials.samples_per_run(operation),
            })
        })
        .collect()
}
