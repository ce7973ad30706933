//! Per-run search state and the single-iteration step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AbcError, Result};
use crate::evaluation::{CostFunction, Penalty};
use crate::models::CvrpInstance;

use super::config::AbcConfig;
use super::penalty::PenaltyController;
use super::population::Population;
use super::renewal::{explore, exploit, onlooker_neighbors};
use super::scout::scout;
use super::selection::roulette;
use super::tracker::BestTracker;

/// Summary of one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Capacity weight after the update.
    pub alpha: f64,
    /// Duration weight after the update.
    pub beta: f64,
    /// Best overall fitness so far.
    pub best_overall: f64,
    /// Best feasible distance so far.
    pub best_feasible: Option<f64>,
    /// Feasible sources before the penalty update.
    pub feasible_count: usize,
    /// Sources abandoned by scouts this iteration.
    pub abandoned: usize,
}

/// Everything one run owns: population, penalty weights and trackers.
///
/// Independent runs never share a `SearchState`.
pub struct SearchState<'a> {
    instance: &'a CvrpInstance,
    config: &'a AbcConfig,
    population: Population,
    penalty: PenaltyController,
    tracker: BestTracker,
    iteration: usize,
}

impl<'a> SearchState<'a> {
    /// Validates `config`, then builds and scores the initial population.
    pub fn new<R: Rng>(
        instance: &'a CvrpInstance,
        config: &'a AbcConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate(instance)?;
        let penalty = Penalty::new(config.alpha, config.beta);
        let population = Population::initialize(instance, config.food_sources, penalty, rng);
        let tracker = BestTracker::seed(&population)
            .ok_or_else(|| AbcError::InvalidConfig("food_sources must be positive".into()))?;
        Ok(Self {
            instance,
            config,
            population,
            penalty: PenaltyController::new(penalty, config.delta),
            tracker,
            iteration: 0,
        })
    }

    /// Runs one iteration: employed, onlooker and scout phases, then the
    /// trackers and the penalty update.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<IterationReport> {
        let cost = CostFunction::new(self.instance);
        let operators = &self.config.operators;
        let penalty = self.penalty.penalty();

        exploit(&mut self.population, &cost, operators, penalty, rng)?;

        let selected = roulette(&self.population, self.config.food_sources, rng)?;
        let neighbors = onlooker_neighbors(selected, &cost, operators, penalty, rng)?;
        explore(&mut self.population, &neighbors, self.config.variant.exploration());

        let abandoned = scout(
            &mut self.population,
            self.instance,
            operators,
            self.config.variant.scout(),
            self.config.stagnation_limit,
            penalty,
            rng,
        )?;

        let feasible_count = self.population.feasible_count();
        self.tracker.observe(&self.population);
        self.penalty.update(&mut self.population);

        let updated = self.penalty.penalty();
        let report = IterationReport {
            iteration: self.iteration,
            alpha: updated.alpha,
            beta: updated.beta,
            best_overall: self.tracker.overall().value,
            best_feasible: self.tracker.feasible().map(|f| f.value),
            feasible_count,
            abandoned: abandoned.len(),
        };
        self.iteration += 1;
        Ok(report)
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Current penalty weights.
    pub fn penalty(&self) -> Penalty {
        self.penalty.penalty()
    }

    /// Best-so-far trackers.
    pub fn tracker(&self) -> &BestTracker {
        &self.tracker
    }

    /// Iterations completed.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Consumes the state, returning the trackers.
    pub fn into_tracker(self) -> BestTracker {
        self.tracker
    }
}
