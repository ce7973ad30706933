//! Food sources: the colony's population of candidates.

use rand::Rng;

use crate::constructive::nearest_vehicle;
use crate::evaluation::{CostFunction, Evaluation, Penalty, Scored};
use crate::models::{Candidate, CvrpInstance};

/// One population slot: a candidate with its cost figures and trial counter.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSource {
    /// The candidate permutation.
    pub candidate: Candidate,
    /// Penalized fitness under the current penalty weights.
    pub fitness: f64,
    /// Unweighted distance and violations.
    pub evaluation: Evaluation,
    /// Consecutive trials without strict improvement.
    pub trials: usize,
}

impl FoodSource {
    /// Creates a fresh source with a zero trial counter.
    pub fn new(candidate: Candidate, scored: Scored) -> Self {
        Self {
            candidate,
            fitness: scored.fitness,
            evaluation: scored.evaluation,
            trials: 0,
        }
    }

    /// Overwrites this source and resets its trial counter.
    pub fn replace(&mut self, candidate: Candidate, scored: Scored) {
        *self = Self::new(candidate, scored);
    }

    /// Returns `true` if neither constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.evaluation.is_feasible()
    }
}

/// The fixed-size, positionally indexed set of food sources.
#[derive(Debug, Clone)]
pub struct Population {
    sources: Vec<FoodSource>,
}

impl Population {
    /// Builds `size` sources with the nearest-vehicle heuristic.
    pub fn initialize<R: Rng>(
        instance: &CvrpInstance,
        size: usize,
        penalty: Penalty,
        rng: &mut R,
    ) -> Self {
        let cost = CostFunction::new(instance);
        let sources = (0..size)
            .map(|_| {
                let candidate = nearest_vehicle(instance, rng);
                let scored = cost.score(&candidate, penalty);
                FoodSource::new(candidate, scored)
            })
            .collect();
        Self { sources }
    }

    /// Wraps existing sources.
    pub fn from_sources(sources: Vec<FoodSource>) -> Self {
        Self { sources }
    }

    /// All sources in position order.
    pub fn sources(&self) -> &[FoodSource] {
        &self.sources
    }

    /// Mutable access to the sources.
    pub fn sources_mut(&mut self) -> &mut [FoodSource] {
        &mut self.sources
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if there are no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Current fitness of every source.
    pub fn fitnesses(&self) -> Vec<f64> {
        self.sources.iter().map(|s| s.fitness).collect()
    }

    /// Source with the lowest fitness (first on ties).
    pub fn best(&self) -> Option<(usize, &FoodSource)> {
        self.sources
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.fitness.total_cmp(&b.fitness))
    }

    /// Feasible source with the lowest distance (first on ties).
    pub fn best_feasible(&self) -> Option<(usize, &FoodSource)> {
        self.sources
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_feasible())
            .min_by(|(_, a), (_, b)| a.evaluation.distance.total_cmp(&b.evaluation.distance))
    }

    /// Number of feasible sources.
    pub fn feasible_count(&self) -> usize {
        self.sources.iter().filter(|s| s.is_feasible()).count()
    }
}

impl std::ops::Index<usize> for Population {
    type Output = FoodSource;

    fn index(&self, index: usize) -> &FoodSource {
        &self.sources[index]
    }
}

impl std::ops::IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut FoodSource {
        &mut self.sources[index]
    }
}
