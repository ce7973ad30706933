//! Distance matrices.
//!
//! Provides a dense distance matrix over the depot and customers.

mod matrix;

pub use matrix::DistanceMatrix;
