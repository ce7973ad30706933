//! Insertion moves: single customer and subsequence relocation.

use rand::Rng;

use crate::error::Result;

use super::exchange::draw_pair;
use super::{concat, maybe_reversed, sorted_cuts, Operator};

/// Removes the customer at `from` and reinserts it at `to`.
///
/// `to` indexes the sequence after removal, so `to == len - 1` appends.
///
/// ```
/// use abc_cvrp::neighborhood::insertion_at;
///
/// assert_eq!(insertion_at(&[1, 2, 3, 4, 5], 1, 3), vec![1, 3, 4, 2, 5]);
/// assert_eq!(insertion_at(&[1, 2, 3, 4, 5], 4, 0), vec![5, 1, 2, 3, 4]);
/// ```
pub fn insertion_at(customers: &[usize], from: usize, to: usize) -> Vec<usize> {
    let mut out = customers.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    out
}

/// Moves a random customer to a random position.
pub fn insertion<R: Rng>(customers: &[usize], rng: &mut R) -> Result<Vec<usize>> {
    Operator::Insertion.check_len(customers.len())?;
    let (from, to) = draw_pair(customers, Operator::Insertion, rng)?;
    Ok(insertion_at(customers, from, to))
}

/// Reorders as `[0:a] [b:c] [a:b] [c:end]` for sorted cuts `a<b<c`.
///
/// ```
/// use abc_cvrp::neighborhood::subsequence_insertion_at;
///
/// let x = [1, 2, 3, 4, 5, 6];
/// assert_eq!(subsequence_insertion_at(&x, [1, 3, 5]), vec![1, 4, 5, 2, 3, 6]);
/// ```
pub fn subsequence_insertion_at(customers: &[usize], cuts: [usize; 3]) -> Vec<usize> {
    let [a, b, c] = cuts;
    concat(&[
        &customers[..a],
        &customers[b..c],
        &customers[a..b],
        &customers[c..],
    ])
}

/// Moves a random subsequence in front of the one preceding it.
pub fn subsequence_insertion<R: Rng>(customers: &[usize], rng: &mut R) -> Result<Vec<usize>> {
    Operator::SubsequenceInsertion.check_len(customers.len())?;
    let cuts = sorted_cuts(customers.len(), 3, rng);
    Ok(subsequence_insertion_at(customers, [cuts[0], cuts[1], cuts[2]]))
}

/// Like [`subsequence_insertion_at`], reversing the moved `[b:c]` if asked.
pub fn reversed_subsequence_insertion_at(
    customers: &[usize],
    cuts: [usize; 3],
    reverse: bool,
) -> Vec<usize> {
    let [a, b, c] = cuts;
    let moved = maybe_reversed(&customers[b..c], reverse);
    concat(&[&customers[..a], &moved, &customers[a..b], &customers[c..]])
}

/// Subsequence insertion with the moved piece reversed with probability 1/2.
pub fn reversed_subsequence_insertion<R: Rng>(
    customers: &[usize],
    rng: &mut R,
) -> Result<Vec<usize>> {
    Operator::ReversedSubsequenceInsertion.check_len(customers.len())?;
    let cuts = sorted_cuts(customers.len(), 3, rng);
    let reverse = rng.random_bool(0.5);
    Ok(reversed_subsequence_insertion_at(
        customers,
        [cuts[0], cuts[1], cuts[2]],
        reverse,
    ))
}
