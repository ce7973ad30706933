//! Customer (and depot) locations.

use serde::{Deserialize, Serialize};

/// A customer (or the depot) of a capacitated routing instance.
///
/// Location 0 is always the depot, with zero demand.
///
/// # Examples
///
/// ```
/// use abc_cvrp::models::Customer;
///
/// let depot = Customer::depot(35.0, 35.0);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Customer::new(1, 41.0, 49.0, 10);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: usize, x: f64, y: f64, demand: i32) -> Self {
        Self { id, x, y, demand }
    }

    /// Creates a depot at the given coordinates (id=0, demand=0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, 0)
    }

    /// Location ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Units to pick up at this location.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
