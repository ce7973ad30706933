//! Constructive heuristics for building initial colony candidates.
//!
//! - [`nearest_vehicle`] — Random customer order, each assigned to the
//!   vehicle currently parked nearest to it, O(n·V)

mod nearest_vehicle;

pub use nearest_vehicle::{initial_candidates, nearest_vehicle, nearest_vehicle_routes};
