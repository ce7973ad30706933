//! Segment reversal (2-opt style move on the flat sequence).

use rand::Rng;

use crate::error::Result;

use super::Operator;

/// Reverses `len` customers starting at `start`.
///
/// ```
/// use abc_cvrp::neighborhood::reversal_at;
///
/// assert_eq!(reversal_at(&[1, 2, 3, 4], 1, 2), vec![1, 3, 2, 4]);
/// ```
pub fn reversal_at(customers: &[usize], start: usize, len: usize) -> Vec<usize> {
    let mut out = customers.to_vec();
    out[start..start + len].reverse();
    out
}

/// Reverses a random run of at least two customers.
pub fn reversal<R: Rng>(customers: &[usize], rng: &mut R) -> Result<Vec<usize>> {
    Operator::Reversal.check_len(customers.len())?;
    let n = customers.len();
    let start = rng.random_range(0..=n - 2);
    let len = rng.random_range(2..=n - start);
    Ok(reversal_at(customers, start, len))
}
