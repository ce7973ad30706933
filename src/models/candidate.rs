//! Flat permutation encoding of a CVRP solution.

use serde::{Deserialize, Serialize};

/// A candidate solution: a permutation of customer IDs `1..=n`.
///
/// The candidate holds no depot markers. Trip boundaries are derived by the
/// [decoder](crate::evaluation::decode).
///
/// # Examples
///
/// ```
/// use abc_cvrp::models::Candidate;
///
/// let c = Candidate::new(vec![3, 1, 2]);
/// assert_eq!(c.customers(), &[3, 1, 2]);
/// assert!(c.is_permutation_of(3));
/// assert!(!c.is_permutation_of(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate {
    customers: Vec<usize>,
}

impl Candidate {
    /// Wraps a customer sequence.
    pub fn new(customers: Vec<usize>) -> Self {
        Self { customers }
    }

    /// Returns the customer sequence.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Consumes the candidate, returning the customer sequence.
    pub fn into_customers(self) -> Vec<usize> {
        self.customers
    }

    /// Number of customers in this candidate.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns true if the candidate has no customers.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Returns true if this is exactly a permutation of `1..=n`.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.customers.len() != n {
            return false;
        }
        let mut seen = vec![false; n + 1];
        for &c in &self.customers {
            if c == 0 || c > n || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }
}

impl From<Vec<usize>> for Candidate {
    fn from(customers: Vec<usize>) -> Self {
        Self::new(customers)
    }
}
