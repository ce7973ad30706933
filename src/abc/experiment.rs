//! Repeated runs across variants with per-variant summaries.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{AbcError, Result};
use crate::models::CvrpInstance;

use super::config::{AbcConfig, Variant};
use super::runner::AbcRunner;

/// One isolated run inside an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Variant that ran.
    pub variant: Variant,
    /// Zero-based repetition index.
    pub run: usize,
    /// Seed the run's generator was built from.
    pub seed: u64,
    /// Best overall fitness.
    pub best_overall: f64,
    /// Best feasible distance, if any.
    pub best_feasible: Option<f64>,
    /// Trips of the best feasible solution, depot included.
    pub routes: Option<Vec<Vec<usize>>>,
    /// Best overall fitness per iteration.
    pub overall_history: Vec<f64>,
    /// Best feasible distance per iteration.
    pub feasible_history: Vec<Option<f64>>,
    /// Wall-clock duration in seconds.
    pub seconds: f64,
}

/// Aggregate figures for one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    /// Variant summarized.
    pub variant: Variant,
    /// Runs performed.
    pub runs: usize,
    /// Runs that found a feasible solution.
    pub feasible_runs: usize,
    /// Shortest feasible distance across runs.
    pub best: Option<f64>,
    /// Longest best-feasible distance across runs.
    pub worst: Option<f64>,
    /// Mean best-feasible distance over feasible runs.
    pub mean: Option<f64>,
    /// Mean wall-clock seconds per run.
    pub mean_seconds: f64,
    /// `(best - best_known) / best_known * 100` when both are known.
    pub gap_percent: Option<f64>,
}

impl VariantSummary {
    /// Summarizes the records of one variant.
    pub fn from_records(
        variant: Variant,
        records: &[RunRecord],
        best_known: Option<f64>,
    ) -> Self {
        let distances: Vec<f64> = records.iter().filter_map(|r| r.best_feasible).collect();
        let best = distances.iter().copied().min_by(f64::total_cmp);
        let worst = distances.iter().copied().max_by(f64::total_cmp);
        let mean = if distances.is_empty() {
            None
        } else {
            Some(distances.iter().sum::<f64>() / distances.len() as f64)
        };
        let mean_seconds = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| r.seconds).sum::<f64>() / records.len() as f64
        };
        let gap_percent = match (best, best_known) {
            (Some(b), Some(k)) if k > 0.0 => Some((b - k) / k * 100.0),
            _ => None,
        };
        Self {
            variant,
            runs: records.len(),
            feasible_runs: distances.len(),
            best,
            worst,
            mean,
            mean_seconds,
            gap_percent,
        }
    }
}

/// Everything an experiment produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Instance name.
    pub instance: String,
    /// Best known distance of the instance, if recorded.
    pub best_known: Option<f64>,
    /// Configuration shared by every run (variant and seed overridden per run).
    pub config: AbcConfig,
    /// Every run in execution order.
    pub records: Vec<RunRecord>,
    /// One summary per variant, in the order they ran.
    pub summaries: Vec<VariantSummary>,
}

impl ExperimentReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as pretty-printed JSON to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), records = self.records.len(), "report saved");
        Ok(())
    }

    /// Reads a report written by [`ExperimentReport::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Summary for `variant`, if it ran.
    pub fn summary(&self, variant: Variant) -> Option<&VariantSummary> {
        self.summaries.iter().find(|s| s.variant == variant)
    }
}

/// A sweep over variants with repeated, independently seeded runs.
///
/// Run `k` of every variant uses seed `base_seed + k`, so the variants are
/// compared on the same seeds.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: AbcConfig,
    variants: Vec<Variant>,
    runs: usize,
    base_seed: u64,
}

impl Experiment {
    /// Ten runs of every variant, seeded from `config.seed` (0 when unset).
    pub fn new(config: AbcConfig) -> Self {
        Self {
            base_seed: config.seed.unwrap_or(0),
            config,
            variants: Variant::ALL.to_vec(),
            runs: 10,
        }
    }

    /// Sets the variants to compare.
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Sets the number of runs per variant.
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Sets the seed of the first run.
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Runs every variant `runs` times.
    #[tracing::instrument(level = "debug", name = "ABC Experiment", skip_all, fields(
        instance = instance.name(),
        runs = self.runs
    ))]
    pub fn run(&self, instance: &CvrpInstance) -> Result<ExperimentReport> {
        if self.runs == 0 {
            return Err(AbcError::InvalidConfig("runs must be positive".into()));
        }
        if self.variants.is_empty() {
            return Err(AbcError::InvalidConfig(
                "at least one variant must be selected".into(),
            ));
        }
        self.config.validate(instance)?;

        let mut records = Vec::with_capacity(self.variants.len() * self.runs);
        let mut summaries = Vec::with_capacity(self.variants.len());
        for &variant in &self.variants {
            let start = records.len();
            for run in 0..self.runs {
                let seed = self.base_seed.wrapping_add(run as u64);
                let config = self.config.clone().with_variant(variant).with_seed(seed);

                let clock = Instant::now();
                let outcome = AbcRunner::run(instance, &config)?;
                let seconds = clock.elapsed().as_secs_f64();

                records.push(RunRecord {
                    variant,
                    run,
                    seed,
                    best_overall: outcome.best_overall.value,
                    best_feasible: outcome.best_feasible.as_ref().map(|f| f.distance),
                    routes: outcome.best_feasible.as_ref().map(|f| f.trace.stops()),
                    overall_history: outcome.overall_history,
                    feasible_history: outcome.feasible_history,
                    seconds,
                });
            }
            let summary =
                VariantSummary::from_records(variant, &records[start..], instance.best_known());
            tracing::info!(
                %variant,
                feasible_runs = summary.feasible_runs,
                best = ?summary.best,
                mean = ?summary.mean,
                gap_percent = ?summary.gap_percent,
                "variant finished"
            );
            summaries.push(summary);
        }

        Ok(ExperimentReport {
            instance: instance.name().to_string(),
            best_known: instance.best_known(),
            config: self.config.clone(),
            records,
            summaries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;
    use crate::neighborhood::Operator;

    fn record(variant: Variant, best_feasible: Option<f64>, seconds: f64) -> RunRecord {
        RunRecord {
            variant,
            run: 0,
            seed: 0,
            best_overall: best_feasible.unwrap_or(1.0),
            best_feasible,
            routes: None,
            overall_history: vec![],
            feasible_history: vec![],
            seconds,
        }
    }

    fn instance() -> CvrpInstance {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 1),
            Customer::new(2, 2.0, 0.0, 1),
            Customer::new(3, 0.0, 1.0, 1),
            Customer::new(4, 0.0, 2.0, 1),
        ];
        CvrpInstance::new(customers, 2, 100)
            .expect("valid")
            .with_name("cross")
            .with_best_known(8.0)
    }

    #[test]
    fn test_summary_statistics() {
        let records = vec![
            record(Variant::Original, Some(110.0), 1.0),
            record(Variant::Original, None, 2.0),
            record(Variant::Original, Some(100.0), 3.0),
        ];
        let s = VariantSummary::from_records(Variant::Original, &records, Some(80.0));
        assert_eq!(s.runs, 3);
        assert_eq!(s.feasible_runs, 2);
        assert_eq!(s.best, Some(100.0));
        assert_eq!(s.worst, Some(110.0));
        assert_eq!(s.mean, Some(105.0));
        assert_eq!(s.mean_seconds, 2.0);
        assert_eq!(s.gap_percent, Some(25.0));
    }

    #[test]
    fn test_summary_without_feasible() {
        let records = vec![record(Variant::Enhanced, None, 1.0)];
        let s = VariantSummary::from_records(Variant::Enhanced, &records, Some(80.0));
        assert_eq!(s.best, None);
        assert_eq!(s.mean, None);
        assert_eq!(s.gap_percent, None);
    }

    #[test]
    fn test_experiment_runs_every_variant() {
        let config = AbcConfig::for_customers(4)
            .with_operators(vec![Operator::Swap, Operator::Insertion, Operator::Reversal])
            .with_food_sources(5)
            .with_iterations(15);
        let report = Experiment::new(config)
            .with_runs(2)
            .with_base_seed(100)
            .run(&instance())
            .expect("valid");

        assert_eq!(report.records.len(), 6);
        assert_eq!(report.summaries.len(), 3);
        assert_eq!(report.instance, "cross");
        for variant in Variant::ALL {
            let seeds: Vec<u64> = report
                .records
                .iter()
                .filter(|r| r.variant == variant)
                .map(|r| r.seed)
                .collect();
            assert_eq!(seeds, vec![100, 101]);
            let summary = report.summary(variant).expect("ran");
            assert_eq!(summary.runs, 2);
            assert_eq!(summary.feasible_runs, 2);
            assert!(summary.gap_percent.is_some());
        }

        let json = report.to_json().expect("serialize");
        let back: ExperimentReport = serde_json::from_str(&json).expect("parse");
        assert_eq!(back.records.len(), 6);
        assert!(json.contains("\"semi-enhanced\""));
    }

    #[test]
    fn test_report_saved_and_reloaded() {
        let config = AbcConfig::for_customers(4)
            .with_operators(vec![Operator::Swap, Operator::Reversal])
            .with_food_sources(4)
            .with_iterations(5);
        let report = Experiment::new(config)
            .with_variants(vec![Variant::Enhanced])
            .with_runs(2)
            .run(&instance())
            .expect("valid");

        let dir = std::env::temp_dir().join(format!("abc-cvrp-report-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("cross.json");
        report.save(&path).expect("write");
        let back = ExperimentReport::load(&path).expect("read");
        assert_eq!(back.records.len(), 2);
        assert_eq!(back.records[1].seed, report.records[1].seed);
        assert_eq!(back.summaries[0].variant, Variant::Enhanced);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            report.save(dir.join("missing").join("cross.json")),
            Err(AbcError::Io(_))
        ));
    }

    #[test]
    fn test_experiment_rejects_zero_runs() {
        let err = Experiment::new(AbcConfig::for_customers(4).with_operators(vec![Operator::Swap]))
            .with_runs(0)
            .run(&instance());
        assert!(matches!(err, Err(AbcError::InvalidConfig(_))));
    }
}
