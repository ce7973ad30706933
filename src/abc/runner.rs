//! Full colony runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::Result;
use crate::evaluation::{decode, Penalty};
use crate::models::{Candidate, CvrpInstance, Trace};

use super::config::AbcConfig;
use super::state::SearchState;
use super::tracker::Incumbent;

/// The best feasible solution of a run, decoded into trips.
#[derive(Debug, Clone, Serialize)]
pub struct FeasibleSolution {
    /// Flat customer sequence.
    pub candidate: Candidate,
    /// Total travel distance.
    pub distance: f64,
    /// Per-vehicle trips.
    pub trace: Trace,
}

/// Result of one run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Lowest-fitness solution seen, feasible or not.
    pub best_overall: Incumbent,
    /// Shortest feasible solution seen; `None` if no source was ever feasible.
    pub best_feasible: Option<FeasibleSolution>,
    /// Best overall fitness after each iteration.
    pub overall_history: Vec<f64>,
    /// Best feasible distance after each iteration.
    pub feasible_history: Vec<Option<f64>>,
    /// Penalty weights after the last iteration.
    pub final_penalty: Penalty,
    /// Iterations run.
    pub iterations: usize,
}

impl RunOutcome {
    /// Returns `true` if a feasible solution was found.
    pub fn is_feasible(&self) -> bool {
        self.best_feasible.is_some()
    }
}

/// Runs the bee colony on one instance.
///
/// # Examples
///
/// ```
/// use abc_cvrp::abc::{AbcConfig, AbcRunner};
/// use abc_cvrp::models::{Customer, CvrpInstance};
/// use abc_cvrp::neighborhood::Operator;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 1),
///     Customer::new(2, 2.0, 0.0, 1),
///     Customer::new(3, 0.0, 1.0, 1),
///     Customer::new(4, 0.0, 2.0, 1),
/// ];
/// let instance = CvrpInstance::new(customers, 2, 100).unwrap();
/// let config = AbcConfig::for_customers(4)
///     .with_operators(vec![Operator::Swap, Operator::Reversal])
///     .with_iterations(50)
///     .with_food_sources(6)
///     .with_seed(42);
///
/// let outcome = AbcRunner::run(&instance, &config).unwrap();
/// assert_eq!(outcome.overall_history.len(), 50);
/// let best = outcome.best_feasible.expect("capacity never binds");
/// assert!(best.candidate.is_permutation_of(4));
/// ```
pub struct AbcRunner;

impl AbcRunner {
    /// Runs with a generator seeded from `config.seed`, or from OS entropy.
    pub fn run(instance: &CvrpInstance, config: &AbcConfig) -> Result<RunOutcome> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs with a caller-supplied generator.
    #[tracing::instrument(level = "debug", name = "ABC Run", skip_all, fields(
        instance = instance.name(),
        variant = %config.variant,
        iterations = config.iterations
    ))]
    pub fn run_with_rng<R: Rng>(
        instance: &CvrpInstance,
        config: &AbcConfig,
        rng: &mut R,
    ) -> Result<RunOutcome> {
        let mut state = SearchState::new(instance, config, rng)?;
        let report_every = (config.iterations / 10).max(1);

        for _ in 0..config.iterations {
            let report = state.step(rng)?;
            if report.iteration % report_every == 0 {
                tracing::debug!(
                    iteration = report.iteration,
                    best_overall = report.best_overall,
                    best_feasible = ?report.best_feasible,
                    alpha = report.alpha,
                    beta = report.beta,
                    "progress"
                );
            }
        }

        let final_penalty = state.penalty();
        let iterations = state.iteration();
        let (best_overall, feasible, overall_history, feasible_history) =
            state.into_tracker().into_parts();

        let best_feasible = feasible.map(|f| FeasibleSolution {
            trace: decode(f.candidate.customers(), instance),
            distance: f.value,
            candidate: f.candidate,
        });

        match &best_feasible {
            Some(best) => tracing::info!(distance = best.distance, iterations, "run finished"),
            None => tracing::info!(iterations, "run finished without a feasible solution"),
        }

        Ok(RunOutcome {
            best_overall,
            best_feasible,
            overall_history,
            feasible_history,
            final_penalty,
            iterations,
        })
    }
}
