//! Decoding and cost evaluation.
//!
//! - [`decode`] — Permutation to per-vehicle trips (greedy capacity and duration split)
//! - [`CostFunction`] — Travel distance plus weighted constraint overages

mod cost;
mod decoder;

pub use cost::{CostFunction, Evaluation, Penalty, Scored};
pub use decoder::{build_trip, decode, split_into_trips};
