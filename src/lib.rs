//! # abc-cvrp
//!
//! Artificial bee colony optimization for the capacitated vehicle routing
//! problem with an optional route duration limit.
//!
//! Solutions are searched as flat customer permutations, decoded into one
//! trip per vehicle, and scored as travel distance plus adaptively weighted
//! capacity and duration overages.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, CvrpInstance, Candidate, Trace)
//! - [`distance`] — Distance matrix
//! - [`evaluation`] — Permutation decoding and penalized cost
//! - [`constructive`] — Nearest-vehicle construction of initial candidates
//! - [`neighborhood`] — Seven permutation-preserving moves
//! - [`abc`] — The colony: original, semi-enhanced and enhanced variants
//! - [`io`] — CMT / Golden instance and solution readers
//!
//! ## Example
//!
//! ```
//! use abc_cvrp::abc::{AbcConfig, AbcRunner, Variant};
//! use abc_cvrp::models::{Customer, CvrpInstance};
//! use abc_cvrp::neighborhood::Operator;
//!
//! let customers = vec![
//!     Customer::depot(0.0, 0.0),
//!     Customer::new(1, 10.0, 0.0, 4),
//!     Customer::new(2, 11.0, 1.0, 4),
//!     Customer::new(3, -10.0, 0.0, 4),
//!     Customer::new(4, -11.0, 1.0, 4),
//! ];
//! let instance = CvrpInstance::new(customers, 2, 8).unwrap();
//! let config = AbcConfig::for_customers(4)
//!     .with_variant(Variant::Enhanced)
//!     .with_operators(vec![Operator::Swap, Operator::Insertion, Operator::Reversal])
//!     .with_food_sources(10)
//!     .with_iterations(200)
//!     .with_seed(7);
//!
//! let outcome = AbcRunner::run(&instance, &config).unwrap();
//! if let Some(best) = &outcome.best_feasible {
//!     assert_eq!(best.trace.total_load(), 16);
//! }
//! ```

pub mod abc;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod models;
pub mod neighborhood;

pub use error::{AbcError, Result};
