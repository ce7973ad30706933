//! Benchmark file readers.
//!
//! - [`parse_instance`] / [`load_instance`] — CMT and Golden `.vrp` instances
//! - [`parse_best_known_routes`] / [`load_best_known_routes`] — Companion `.sol` routes

mod instance;
mod solution;

pub use instance::{load_instance, parse_instance};
pub use solution::{load_best_known_routes, parse_best_known_routes};
