//! Adaptive penalty weights.
//!
//! After each iteration the weight of a constraint grows by a factor
//! `1 + delta` when more than half of the food sources violate it and
//! shrinks by the same factor otherwise. Every fitness is then recomputed
//! from the stored unweighted figures.

use serde::{Deserialize, Serialize};

use crate::evaluation::Penalty;

use super::population::Population;

/// Violator counts observed by one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViolationCounts {
    /// Sources over capacity on some trip.
    pub capacity: usize,
    /// Sources over the duration limit on some trip.
    pub duration: usize,
}

impl ViolationCounts {
    /// Counts violators in `population`.
    pub fn of(population: &Population) -> Self {
        let mut counts = Self::default();
        for s in population.sources() {
            if s.evaluation.capacity_violation > 0.0 {
                counts.capacity += 1;
            }
            if s.evaluation.duration_violation > 0.0 {
                counts.duration += 1;
            }
        }
        counts
    }
}

/// Owns the run's `(alpha, beta)` pair and its update rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyController {
    penalty: Penalty,
    delta: f64,
}

impl PenaltyController {
    /// Starts from `penalty` with growth step `delta`.
    pub fn new(penalty: Penalty, delta: f64) -> Self {
        Self { penalty, delta }
    }

    /// Current weights.
    pub fn penalty(&self) -> Penalty {
        self.penalty
    }

    /// Relative update step.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Adjusts both weights from the population's violators, then rescores
    /// every source with the new weights.
    pub fn update(&mut self, population: &mut Population) -> ViolationCounts {
        let counts = ViolationCounts::of(population);
        let half = population.len() / 2;
        let factor = 1.0 + self.delta;

        self.penalty.alpha = scaled(self.penalty.alpha, counts.capacity > half, factor);
        self.penalty.beta = scaled(self.penalty.beta, counts.duration > half, factor);

        for s in population.sources_mut() {
            s.fitness = s.evaluation.fitness(self.penalty);
        }

        tracing::trace!(
            alpha = self.penalty.alpha,
            beta = self.penalty.beta,
            capacity_violators = counts.capacity,
            duration_violators = counts.duration,
            "penalty updated"
        );
        counts
    }
}

fn scaled(weight: f64, grow: bool, factor: f64) -> f64 {
    if grow {
        weight * factor
    } else {
        weight / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abc::population::tests::source;

    #[test]
    fn test_majority_grows_minority_shrinks() {
        // 3 of 4 violate capacity, 2 of 4 violate duration (not more than half).
        let mut pop = Population::from_sources(vec![
            source(10.0, 1.0, 1.0, 0),
            source(10.0, 1.0, 1.0, 0),
            source(10.0, 1.0, 0.0, 0),
            source(10.0, 0.0, 0.0, 0),
        ]);
        let mut ctl = PenaltyController::new(Penalty::new(0.1, 0.1), 0.5);
        let counts = ctl.update(&mut pop);
        assert_eq!(counts, ViolationCounts { capacity: 3, duration: 2 });
        assert!(ctl.penalty().alpha > 0.1);
        assert!(ctl.penalty().beta < 0.1);
        assert!((ctl.penalty().alpha - 0.15).abs() < 1e-12);
        assert!((ctl.penalty().beta - 0.1 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_odd_size_threshold() {
        // size 5: half is 2, so 3 violators grow and 2 shrink
        let three = Population::from_sources(
            [1.0, 1.0, 1.0, 0.0, 0.0]
                .iter()
                .map(|&c| source(10.0, c, 0.0, 0))
                .collect(),
        );
        let mut ctl = PenaltyController::new(Penalty::new(1.0, 1.0), 0.1);
        let mut pop = three;
        ctl.update(&mut pop);
        assert!(ctl.penalty().alpha > 1.0);

        let mut pop = Population::from_sources(
            [1.0, 1.0, 0.0, 0.0, 0.0]
                .iter()
                .map(|&c| source(10.0, c, 0.0, 0))
                .collect(),
        );
        let mut ctl = PenaltyController::new(Penalty::new(1.0, 1.0), 0.1);
        ctl.update(&mut pop);
        assert!(ctl.penalty().alpha < 1.0);
    }

    #[test]
    fn test_rescores_from_raw_distance() {
        let mut pop = Population::from_sources(vec![
            source(10.0, 2.0, 0.0, 0),
            source(10.0, 2.0, 4.0, 0),
            source(7.0, 0.0, 0.0, 0),
        ]);
        let mut ctl = PenaltyController::new(Penalty::new(1.0, 1.0), 1.0);
        ctl.update(&mut pop);
        // alpha doubles (2 of 3 violate), beta halves
        assert_eq!(ctl.penalty(), Penalty::new(2.0, 0.5));
        assert_eq!(pop[0].fitness, 10.0 + 2.0 * 2.0);
        assert_eq!(pop[1].fitness, 10.0 + 2.0 * 2.0 + 0.5 * 4.0);
        assert_eq!(pop[2].fitness, 7.0);
    }
}
