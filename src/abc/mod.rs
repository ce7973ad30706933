//! Artificial bee colony for the CVRP.
//!
//! One iteration runs, in order:
//!
//! 1. employed phase: one neighbor per food source, greedy replacement
//! 2. onlooker phase: roulette selection, one neighbor per onlooker, then
//!    replacement per [`ExplorationPolicy`]
//! 3. scout phase: sources past the stagnation limit are replaced per
//!    [`ScoutPolicy`]
//! 4. best-so-far trackers observe the population
//! 5. adaptive penalty update and rescoring
//!
//! - [`AbcConfig`] / [`Variant`] — Parameters and the three published variants
//! - [`SearchState`] — Per-run state, advanced one iteration at a time
//! - [`AbcRunner`] — Whole runs returning a [`RunOutcome`]
//! - [`Experiment`] — Repeated seeded runs across variants

mod config;
mod experiment;
mod penalty;
mod population;
mod renewal;
mod runner;
mod scout;
mod selection;
mod state;
mod tracker;

pub use config::{AbcConfig, ExplorationPolicy, ScoutPolicy, Variant};
pub use experiment::{Experiment, ExperimentReport, RunRecord, VariantSummary};
pub use penalty::{PenaltyController, ViolationCounts};
pub use population::{FoodSource, Population};
pub use renewal::{
    best_neighbor_of, exploit, explore, most_stagnant_above, onlooker_neighbors, OnlookerNeighbor,
    RenewalStats,
};
pub use runner::{AbcRunner, FeasibleSolution, RunOutcome};
pub use scout::scout;
pub use selection::{roulette, roulette_indices, selection_weights, Selected};
pub use state::{IterationReport, SearchState};
pub use tracker::{BestTracker, Incumbent};
