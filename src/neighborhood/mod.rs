//! Neighborhood operators on the flat permutation encoding.
//!
//! Seven stochastic moves, each returning a new sequence with the same
//! length and the same set of customers:
//!
//! | id | operator | min. length |
//! |----|----------|-------------|
//! | 1 | [`Operator::Swap`] | 2 |
//! | 2 | [`Operator::SubsequenceSwap`] | 4 |
//! | 3 | [`Operator::Insertion`] | 2 |
//! | 4 | [`Operator::SubsequenceInsertion`] | 3 |
//! | 5 | [`Operator::Reversal`] | 2 |
//! | 6 | [`Operator::ReversedSubsequenceSwap`] | 7 |
//! | 7 | [`Operator::ReversedSubsequenceInsertion`] | 3 |
//!
//! Each randomized move has a deterministic `*_at` counterpart taking the
//! cut positions explicitly.

mod exchange;
mod insertion;
mod reversal;

use rand::seq::{index, IndexedRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AbcError, Result};
use crate::models::Candidate;

pub use exchange::{
    reversed_subsequence_swap, reversed_subsequence_swap_at, subsequence_swap,
    subsequence_swap_at, swap, swap_at,
};
pub use insertion::{
    insertion, insertion_at, reversed_subsequence_insertion, reversed_subsequence_insertion_at,
    subsequence_insertion, subsequence_insertion_at,
};
pub use reversal::{reversal, reversal_at};

/// Attempt cap for rejection-sampling loops.
pub const MAX_DRAWS: usize = 10_000;

/// A neighborhood move, numbered 1 to 7.
///
/// Serialized as its number so configurations read `[1, 5, 6]`.
///
/// # Examples
///
/// ```
/// use abc_cvrp::neighborhood::Operator;
///
/// let op = Operator::try_from(6).unwrap();
/// assert_eq!(op, Operator::ReversedSubsequenceSwap);
/// assert_eq!(op.min_len(), 7);
/// assert!(Operator::try_from(8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Operator {
    /// Exchange two customers.
    Swap,
    /// Exchange two adjacent-by-cut subsequences.
    SubsequenceSwap,
    /// Move one customer to another position.
    Insertion,
    /// Move a subsequence in front of the preceding one.
    SubsequenceInsertion,
    /// Reverse a contiguous run.
    Reversal,
    /// Subsequence swap, each moved piece reversed with probability 1/2.
    ReversedSubsequenceSwap,
    /// Subsequence insertion, the moved piece reversed with probability 1/2.
    ReversedSubsequenceInsertion,
}

impl Operator {
    /// All operators in id order.
    pub const ALL: [Operator; 7] = [
        Operator::Swap,
        Operator::SubsequenceSwap,
        Operator::Insertion,
        Operator::SubsequenceInsertion,
        Operator::Reversal,
        Operator::ReversedSubsequenceSwap,
        Operator::ReversedSubsequenceInsertion,
    ];

    /// Numeric id (1..=7).
    pub fn id(self) -> u8 {
        match self {
            Operator::Swap => 1,
            Operator::SubsequenceSwap => 2,
            Operator::Insertion => 3,
            Operator::SubsequenceInsertion => 4,
            Operator::Reversal => 5,
            Operator::ReversedSubsequenceSwap => 6,
            Operator::ReversedSubsequenceInsertion => 7,
        }
    }

    /// Short snake_case name used in errors and logs.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Swap => "swap",
            Operator::SubsequenceSwap => "subsequence_swap",
            Operator::Insertion => "insertion",
            Operator::SubsequenceInsertion => "subsequence_insertion",
            Operator::Reversal => "reversal",
            Operator::ReversedSubsequenceSwap => "reversed_subsequence_swap",
            Operator::ReversedSubsequenceInsertion => "reversed_subsequence_insertion",
        }
    }

    /// Shortest sequence this operator can transform.
    pub fn min_len(self) -> usize {
        match self {
            Operator::Swap | Operator::Insertion | Operator::Reversal => 2,
            Operator::SubsequenceInsertion | Operator::ReversedSubsequenceInsertion => 3,
            Operator::SubsequenceSwap => 4,
            // three gaps of at least 2 between four cuts
            Operator::ReversedSubsequenceSwap => 7,
        }
    }

    /// Fails with [`AbcError::InstanceTooSmall`] if `len` is too short.
    pub fn check_len(self, len: usize) -> Result<()> {
        if len < self.min_len() {
            return Err(AbcError::InstanceTooSmall {
                operator: self.name(),
                required: self.min_len(),
                actual: len,
            });
        }
        Ok(())
    }

    /// Applies this operator to `customers`, returning the new sequence.
    pub fn apply<R: Rng>(self, customers: &[usize], rng: &mut R) -> Result<Vec<usize>> {
        match self {
            Operator::Swap => swap(customers, rng),
            Operator::SubsequenceSwap => subsequence_swap(customers, rng),
            Operator::Insertion => insertion(customers, rng),
            Operator::SubsequenceInsertion => subsequence_insertion(customers, rng),
            Operator::Reversal => reversal(customers, rng),
            Operator::ReversedSubsequenceSwap => reversed_subsequence_swap(customers, rng),
            Operator::ReversedSubsequenceInsertion => {
                reversed_subsequence_insertion(customers, rng)
            }
        }
    }
}

impl TryFrom<u8> for Operator {
    type Error = AbcError;

    fn try_from(id: u8) -> Result<Self> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.id() == id)
            .ok_or_else(|| AbcError::InvalidConfig(format!("unknown operator id {id}")))
    }
}

impl From<Operator> for u8 {
    fn from(op: Operator) -> u8 {
        op.id()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks one of `operators` uniformly and applies it to `candidate`.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use abc_cvrp::models::Candidate;
/// use abc_cvrp::neighborhood::{neighbor, Operator};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let cand = Candidate::new(vec![1, 2, 3, 4, 5, 6, 7, 8]);
/// let next = neighbor(&cand, &[Operator::Swap, Operator::Reversal], &mut rng).unwrap();
/// assert!(next.is_permutation_of(8));
/// ```
pub fn neighbor<R: Rng>(
    candidate: &Candidate,
    operators: &[Operator],
    rng: &mut R,
) -> Result<Candidate> {
    let op = operators
        .choose(rng)
        .ok_or_else(|| AbcError::InvalidConfig("no neighborhood operator enabled".into()))?;
    op.apply(candidate.customers(), rng).map(Candidate::new)
}

/// Draws `k` distinct positions in `0..len`, sorted ascending.
pub(crate) fn sorted_cuts<R: Rng>(len: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut cuts = index::sample(rng, len, k).into_vec();
    cuts.sort_unstable();
    cuts
}

/// Concatenates slices into a new sequence.
pub(crate) fn concat(parts: &[&[usize]]) -> Vec<usize> {
    let mut out = Vec::with_capacity(parts.iter().map(|p| p.len()).sum());
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Copies `part`, reversed if `reverse` is set.
pub(crate) fn maybe_reversed(part: &[usize], reverse: bool) -> Vec<usize> {
    let mut out = part.to_vec();
    if reverse {
        out.reverse();
    }
    out
}
