//! Employed and onlooker phases: neighbor generation and greedy replacement.

use rand::Rng;

use crate::error::Result;
use crate::evaluation::{CostFunction, Penalty, Scored};
use crate::models::Candidate;
use crate::neighborhood::{neighbor, Operator};

use super::config::ExplorationPolicy;
use super::population::Population;
use super::selection::Selected;

/// Counts of what one renewal pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenewalStats {
    /// Sources overwritten by a better neighbor.
    pub replaced: usize,
    /// Sources whose trial counter was incremented.
    pub stagnated: usize,
}

/// Employed phase: one neighbor per source, kept only if strictly better.
///
/// No source's fitness increases.
pub fn exploit<R: Rng>(
    population: &mut Population,
    cost: &CostFunction<'_>,
    operators: &[Operator],
    penalty: Penalty,
    rng: &mut R,
) -> Result<RenewalStats> {
    let mut stats = RenewalStats::default();
    for source in population.sources_mut() {
        let next = neighbor(&source.candidate, operators, rng)?;
        let scored = cost.score(&next, penalty);
        if scored.fitness < source.fitness {
            source.replace(next, scored);
            stats.replaced += 1;
        } else {
            source.trials += 1;
            stats.stagnated += 1;
        }
    }
    Ok(stats)
}

/// A neighbor produced in the onlooker phase.
#[derive(Debug, Clone)]
pub struct OnlookerNeighbor {
    /// Source the onlooker was sent to.
    pub source: usize,
    /// The neighbor candidate.
    pub candidate: Candidate,
    /// Its score under the current penalty.
    pub scored: Scored,
}

/// Applies one move to every selected candidate and scores the result.
pub fn onlooker_neighbors<R: Rng>(
    selected: Vec<Selected>,
    cost: &CostFunction<'_>,
    operators: &[Operator],
    penalty: Penalty,
    rng: &mut R,
) -> Result<Vec<OnlookerNeighbor>> {
    selected
        .into_iter()
        .map(|s| {
            let candidate = neighbor(&s.candidate, operators, rng)?;
            let scored = cost.score(&candidate, penalty);
            Ok(OnlookerNeighbor {
                source: s.source,
                candidate,
                scored,
            })
        })
        .collect()
}

/// Best neighbor whose onlooker came from `source` (first on ties).
pub fn best_neighbor_of(neighbors: &[OnlookerNeighbor], source: usize) -> Option<usize> {
    neighbors
        .iter()
        .enumerate()
        .filter(|(_, n)| n.source == source)
        .min_by(|(_, a), (_, b)| a.scored.fitness.total_cmp(&b.scored.fitness))
        .map(|(k, _)| k)
}

/// Onlooker phase replacement, run for every source that received at least
/// one onlooker, in position order.
///
/// Under [`ExplorationPolicy::ReplaceSource`] the winner overwrites source
/// `i`. Under [`ExplorationPolicy::ReplaceMostStagnant`] it overwrites the
/// source with the most trials among those it beats. Either way a source
/// whose best neighbor is not strictly better gains one trial.
pub fn explore(
    population: &mut Population,
    neighbors: &[OnlookerNeighbor],
    policy: ExplorationPolicy,
) -> RenewalStats {
    let mut stats = RenewalStats::default();
    for i in 0..population.len() {
        let Some(best) = best_neighbor_of(neighbors, i) else {
            continue;
        };
        let winner = &neighbors[best];
        let min_gi = winner.scored.fitness;
        if min_gi < population[i].fitness {
            let target = match policy {
                ExplorationPolicy::ReplaceSource => i,
                ExplorationPolicy::ReplaceMostStagnant => {
                    most_stagnant_above(population, min_gi).unwrap_or(i)
                }
            };
            population[target].replace(winner.candidate.clone(), winner.scored);
            stats.replaced += 1;
        } else {
            population[i].trials += 1;
            stats.stagnated += 1;
        }
    }
    stats
}

/// Among sources with fitness above `threshold`, the one with the most
/// trials (first on ties).
pub fn most_stagnant_above(population: &Population, threshold: f64) -> Option<usize> {
    let mut found: Option<(usize, usize)> = None;
    for (k, s) in population.sources().iter().enumerate() {
        if s.fitness > threshold && found.map_or(true, |(_, t)| s.trials > t) {
            found = Some((k, s.trials));
        }
    }
    found.map(|(k, _)| k)
}
