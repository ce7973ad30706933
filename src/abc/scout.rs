//! Scout phase: abandoning food sources that stopped improving.

use rand::Rng;

use crate::constructive::nearest_vehicle;
use crate::error::Result;
use crate::evaluation::{CostFunction, Penalty};
use crate::models::CvrpInstance;
use crate::neighborhood::{neighbor, Operator};

use super::config::ScoutPolicy;
use super::population::Population;

/// Replaces every source whose trial counter exceeds `limit`.
///
/// The replacement is rescored under `penalty` and starts with zero trials.
/// Returns the positions that were abandoned.
pub fn scout<R: Rng>(
    population: &mut Population,
    instance: &CvrpInstance,
    operators: &[Operator],
    policy: ScoutPolicy,
    limit: usize,
    penalty: Penalty,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let cost = CostFunction::new(instance);
    let mut abandoned = Vec::new();
    for (k, source) in population.sources_mut().iter_mut().enumerate() {
        if source.trials <= limit {
            continue;
        }
        let candidate = match policy {
            ScoutPolicy::Reconstruct => nearest_vehicle(instance, rng),
            ScoutPolicy::Perturb => neighbor(&source.candidate, operators, rng)?,
        };
        let scored = cost.score(&candidate, penalty);
        tracing::trace!(position = k, trials = source.trials, ?policy, "scout abandoned source");
        source.replace(candidate, scored);
        abandoned.push(k);
    }
    Ok(abandoned)
}
