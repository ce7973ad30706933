//! Best-so-far bookkeeping for one run.

use crate::evaluation::Evaluation;
use crate::models::Candidate;

use super::population::Population;

/// A remembered solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// The candidate.
    pub candidate: Candidate,
    /// Value it is ranked by: fitness for the overall best, distance for
    /// the feasible best.
    pub value: f64,
    /// Unweighted figures at the time it was recorded.
    pub evaluation: Evaluation,
}

/// Tracks the best overall and best feasible solution and their per-iteration
/// series. Both series are non-increasing.
#[derive(Debug, Clone)]
pub struct BestTracker {
    overall: Incumbent,
    feasible: Option<Incumbent>,
    overall_history: Vec<f64>,
    feasible_history: Vec<Option<f64>>,
}

impl BestTracker {
    /// Seeds the tracker from the initial population.
    ///
    /// Returns `None` if the population is empty.
    pub fn seed(population: &Population) -> Option<Self> {
        let (_, best) = population.best()?;
        let feasible = population.best_feasible().map(|(_, s)| Incumbent {
            candidate: s.candidate.clone(),
            value: s.evaluation.distance,
            evaluation: s.evaluation,
        });
        Some(Self {
            overall: Incumbent {
                candidate: best.candidate.clone(),
                value: best.fitness,
                evaluation: best.evaluation,
            },
            feasible,
            overall_history: Vec::new(),
            feasible_history: Vec::new(),
        })
    }

    /// Compares the population against the incumbents, replacing them on
    /// strict improvement, and appends one entry to each series.
    ///
    /// Returns `(overall_improved, feasible_improved)`.
    pub fn observe(&mut self, population: &Population) -> (bool, bool) {
        let mut improved = (false, false);

        if let Some((_, best)) = population.best() {
            if best.fitness < self.overall.value {
                self.overall = Incumbent {
                    candidate: best.candidate.clone(),
                    value: best.fitness,
                    evaluation: best.evaluation,
                };
                improved.0 = true;
            }
        }

        if let Some((_, best)) = population.best_feasible() {
            let better = self
                .feasible
                .as_ref()
                .map_or(true, |f| best.evaluation.distance < f.value);
            if better {
                tracing::debug!(distance = best.evaluation.distance, "new best feasible");
                self.feasible = Some(Incumbent {
                    candidate: best.candidate.clone(),
                    value: best.evaluation.distance,
                    evaluation: best.evaluation,
                });
                improved.1 = true;
            }
        }

        self.overall_history.push(self.overall.value);
        self.feasible_history
            .push(self.feasible.as_ref().map(|f| f.value));
        improved
    }

    /// Lowest-fitness solution seen so far.
    pub fn overall(&self) -> &Incumbent {
        &self.overall
    }

    /// Shortest feasible solution seen so far, if any.
    pub fn feasible(&self) -> Option<&Incumbent> {
        self.feasible.as_ref()
    }

    /// Best overall fitness after each observed iteration.
    pub fn overall_history(&self) -> &[f64] {
        &self.overall_history
    }

    /// Best feasible distance after each observed iteration.
    pub fn feasible_history(&self) -> &[Option<f64>] {
        &self.feasible_history
    }

    /// Consumes the tracker.
    pub fn into_parts(self) -> (Incumbent, Option<Incumbent>, Vec<f64>, Vec<Option<f64>>) {
        (
            self.overall,
            self.feasible,
            self.overall_history,
            self.feasible_history,
        )
    }
}
