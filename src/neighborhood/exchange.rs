//! Exchange moves: single swap and subsequence swaps.

use rand::Rng;

use crate::error::{AbcError, Result};

use super::{concat, maybe_reversed, sorted_cuts, Operator, MAX_DRAWS};

/// Draws two positions holding different, non-depot values.
pub(crate) fn draw_pair<R: Rng>(
    customers: &[usize],
    operator: Operator,
    rng: &mut R,
) -> Result<(usize, usize)> {
    let len = customers.len();
    for _ in 0..MAX_DRAWS {
        let i = rng.random_range(0..len);
        let j = rng.random_range(0..len);
        if customers[i] != customers[j] && customers[i] != 0 && customers[j] != 0 {
            return Ok((i, j));
        }
    }
    Err(AbcError::SamplingExhausted {
        operator: operator.name(),
        attempts: MAX_DRAWS,
    })
}

/// Exchanges the customers at positions `i` and `j`.
pub fn swap_at(customers: &[usize], i: usize, j: usize) -> Vec<usize> {
    let mut out = customers.to_vec();
    out.swap(i, j);
    out
}

/// Exchanges two randomly chosen customers.
pub fn swap<R: Rng>(customers: &[usize], rng: &mut R) -> Result<Vec<usize>> {
    Operator::Swap.check_len(customers.len())?;
    let (i, j) = draw_pair(customers, Operator::Swap, rng)?;
    Ok(swap_at(customers, i, j))
}

/// Reorders as `[0:a] [c:d] [b:c] [a:b] [d:end]` for sorted cuts `a<b<c<d`.
///
/// ```
/// use abc_cvrp::neighborhood::subsequence_swap_at;
///
/// let x = [1, 2, 3, 4, 5, 6, 7, 8];
/// assert_eq!(subsequence_swap_at(&x, [1, 3, 4, 6]), vec![1, 5, 6, 4, 2, 3, 7, 8]);
/// ```
pub fn subsequence_swap_at(customers: &[usize], cuts: [usize; 4]) -> Vec<usize> {
    let [a, b, c, d] = cuts;
    concat(&[
        &customers[..a],
        &customers[c..d],
        &customers[b..c],
        &customers[a..b],
        &customers[d..],
    ])
}

/// Swaps the subsequences between four random cut positions.
pub fn subsequence_swap<R: Rng>(customers: &[usize], rng: &mut R) -> Result<Vec<usize>> {
    Operator::SubsequenceSwap.check_len(customers.len())?;
    let cuts = sorted_cuts(customers.len(), 4, rng);
    Ok(subsequence_swap_at(
        customers,
        [cuts[0], cuts[1], cuts[2], cuts[3]],
    ))
}

/// Like [`subsequence_swap_at`], reversing `[c:d]` and/or `[a:b]` as they move.
///
/// ```
/// use abc_cvrp::neighborhood::reversed_subsequence_swap_at;
///
/// let x = [1, 2, 3, 4, 5, 6, 7, 8];
/// let out = reversed_subsequence_swap_at(&x, [0, 2, 4, 6], true, false);
/// assert_eq!(out, vec![6, 5, 3, 4, 1, 2, 7, 8]);
/// ```
pub fn reversed_subsequence_swap_at(
    customers: &[usize],
    cuts: [usize; 4],
    reverse_first: bool,
    reverse_second: bool,
) -> Vec<usize> {
    let [a, b, c, d] = cuts;
    let moved_front = maybe_reversed(&customers[c..d], reverse_first);
    let moved_back = maybe_reversed(&customers[a..b], reverse_second);
    concat(&[
        &customers[..a],
        &moved_front,
        &customers[b..c],
        &moved_back,
        &customers[d..],
    ])
}

/// Subsequence swap with cuts at least two apart, each moved piece
/// reversed with probability 1/2.
pub fn reversed_subsequence_swap<R: Rng>(customers: &[usize], rng: &mut R) -> Result<Vec<usize>> {
    let op = Operator::ReversedSubsequenceSwap;
    op.check_len(customers.len())?;
    for _ in 0..MAX_DRAWS {
        let cuts = sorted_cuts(customers.len(), 4, rng);
        if cuts.windows(2).all(|w| w[1] - w[0] >= 2) {
            let reverse_first = rng.random_bool(0.5);
            let reverse_second = rng.random_bool(0.5);
            return Ok(reversed_subsequence_swap_at(
                customers,
                [cuts[0], cuts[1], cuts[2], cuts[3]],
                reverse_first,
                reverse_second,
            ));
        }
    }
    Err(AbcError::SamplingExhausted {
        operator: op.name(),
        attempts: MAX_DRAWS,
    })
}
