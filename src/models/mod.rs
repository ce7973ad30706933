//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides locations with demands, the immutable problem instance, the
//! flat permutation encoding searched by the colony, and the decoded
//! per-vehicle trips.

mod candidate;
mod customer;
mod instance;
mod trace;

pub use candidate::Candidate;
pub use customer::Customer;
pub use instance::{CvrpInstance, DEFAULT_CAPACITY, DEFAULT_DURATION};
pub use trace::{Trace, Trip};
