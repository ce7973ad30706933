//! Fitness-proportionate (roulette wheel) selection for onlooker bees.
//!
//! The weight of source `k` is `1 / fitness[k]`, normalized to sum to one,
//! so lower fitness means a larger slice of the wheel.

use rand::Rng;

use crate::error::{AbcError, Result};
use crate::models::Candidate;

use super::population::Population;

/// Normalized inverse-fitness selection probabilities.
///
/// Fails if any fitness is zero, negative or not finite.
///
/// ```
/// use abc_cvrp::abc::selection_weights;
///
/// let w = selection_weights(&[10.0, 20.0, 20.0]).unwrap();
/// assert!((w[0] - 0.5).abs() < 1e-12);
/// assert!((w[1] - 0.25).abs() < 1e-12);
/// assert!((w[2] - 0.25).abs() < 1e-12);
/// ```
pub fn selection_weights(fitness: &[f64]) -> Result<Vec<f64>> {
    let mut weights = Vec::with_capacity(fitness.len());
    for (index, &f) in fitness.iter().enumerate() {
        if !(f.is_finite() && f > 0.0) {
            return Err(AbcError::NonPositiveFitness { index, fitness: f });
        }
        weights.push(1.0 / f);
    }
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    Ok(weights)
}

/// Draws `samples` source indices with replacement.
pub fn roulette_indices<R: Rng>(fitness: &[f64], samples: usize, rng: &mut R) -> Result<Vec<usize>> {
    let weights = selection_weights(fitness)?;
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut acc = 0.0;
    for w in &weights {
        acc += w;
        cumulative.push(acc);
    }

    let last = weights.len().saturating_sub(1);
    let picks = (0..samples)
        .map(|_| {
            let u: f64 = rng.random();
            // rounding can leave the final bound a hair below 1.0
            cumulative.iter().position(|&c| u < c).unwrap_or(last)
        })
        .collect();
    Ok(picks)
}

/// A candidate sent to an onlooker, tagged with the source it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
    /// Position of the food source in the population.
    pub source: usize,
    /// Copy of that source's candidate.
    pub candidate: Candidate,
}

/// Samples `samples` food sources by roulette wheel.
pub fn roulette<R: Rng>(
    population: &Population,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<Selected>> {
    let picks = roulette_indices(&population.fitnesses(), samples, rng)?;
    Ok(picks
        .into_iter()
        .map(|source| Selected {
            source,
            candidate: population[source].candidate.clone(),
        })
        .collect())
}
