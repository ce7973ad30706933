//! Penalized cost function.

use serde::{Deserialize, Serialize};

use crate::models::{Candidate, CvrpInstance};

use super::decoder::decode;

/// Weights applied to capacity and duration overages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    /// Weight of the capacity violation.
    pub alpha: f64,
    /// Weight of the duration violation.
    pub beta: f64,
}

impl Penalty {
    /// Creates a penalty pair.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

/// Unweighted cost components of a decoded candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    /// Travel distance summed over all trips.
    pub distance: f64,
    /// Sum over trips of `max(0, load - capacity)`.
    pub capacity_violation: f64,
    /// Sum over trips of `max(0, distance + service - duration)`.
    pub duration_violation: f64,
}

impl Evaluation {
    /// `distance + alpha * capacity_violation + beta * duration_violation`.
    ///
    /// Equals `distance` exactly when both violations are zero.
    pub fn fitness(&self, penalty: Penalty) -> f64 {
        let mut fitness = self.distance;
        if self.capacity_violation > 0.0 {
            fitness += penalty.alpha * self.capacity_violation;
        }
        if self.duration_violation > 0.0 {
            fitness += penalty.beta * self.duration_violation;
        }
        fitness
    }

    /// Returns `true` if neither constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.capacity_violation == 0.0 && self.duration_violation == 0.0
    }
}

/// A candidate's evaluation together with its penalized fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    /// Penalized fitness under the penalty it was scored with.
    pub fitness: f64,
    /// Unweighted components.
    pub evaluation: Evaluation,
}

/// Evaluates candidates of one instance.
///
/// # Examples
///
/// ```
/// use abc_cvrp::models::{Candidate, Customer, CvrpInstance};
/// use abc_cvrp::evaluation::{CostFunction, Penalty};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10),
///     Customer::new(2, 6.0, 8.0, 20),
/// ];
/// let instance = CvrpInstance::new(customers, 1, 25).unwrap();
/// let cost = CostFunction::new(&instance);
///
/// let eval = cost.evaluate(&Candidate::new(vec![1, 2]));
/// // 0→1→2→0 = 5 + 5 + 10
/// assert!((eval.distance - 20.0).abs() < 1e-10);
/// assert_eq!(eval.capacity_violation, 5.0);
/// assert!((eval.fitness(Penalty::new(2.0, 0.0)) - 30.0).abs() < 1e-10);
/// ```
pub struct CostFunction<'a> {
    instance: &'a CvrpInstance,
}

impl<'a> CostFunction<'a> {
    /// Creates a cost function for the given instance.
    pub fn new(instance: &'a CvrpInstance) -> Self {
        Self { instance }
    }

    /// Decodes a candidate and sums distance and linear overages.
    pub fn evaluate(&self, candidate: &Candidate) -> Evaluation {
        let trace = decode(candidate.customers(), self.instance);
        let capacity = self.instance.capacity();
        let duration = self.instance.duration();

        let mut eval = Evaluation::default();
        for trip in trace.trips() {
            eval.distance += trip.distance;
            if trip.load > capacity {
                eval.capacity_violation += (trip.load - capacity) as f64;
            }
            let over = trip.duration() - duration;
            if over > 0.0 {
                eval.duration_violation += over;
            }
        }
        eval
    }

    /// Evaluates a candidate and applies the penalty weights.
    pub fn score(&self, candidate: &Candidate, penalty: Penalty) -> Scored {
        let evaluation = self.evaluate(candidate);
        Scored {
            fitness: evaluation.fitness(penalty),
            evaluation,
        }
    }

    /// Scores every candidate, preserving order.
    pub fn score_all(&self, candidates: &[Candidate], penalty: Penalty) -> Vec<Scored> {
        candidates.iter().map(|c| self.score(c, penalty)).collect()
    }
}
