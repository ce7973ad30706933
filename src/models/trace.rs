//! Decoded per-vehicle trips.

use serde::{Deserialize, Serialize};

/// One vehicle's trip, depot to depot.
///
/// `stops` always starts and ends with the depot (0); a vehicle with no
/// customers has the trip `[0, 0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Visited locations including both depot endpoints.
    pub stops: Vec<usize>,
    /// Travel distance over consecutive stops.
    pub distance: f64,
    /// Total demand picked up.
    pub load: i32,
    /// Service time spent at customer stops.
    pub service_time: f64,
}

impl Trip {
    /// Customers served, without the depot endpoints.
    pub fn customers(&self) -> &[usize] {
        &self.stops[1..self.stops.len() - 1]
    }

    /// Returns `true` if the trip serves no customer.
    pub fn is_empty(&self) -> bool {
        self.stops.len() <= 2
    }

    /// Travel distance plus service time.
    pub fn duration(&self) -> f64 {
        self.distance + self.service_time
    }
}

/// The decoded form of a candidate: exactly one trip per vehicle.
///
/// # Examples
///
/// ```
/// use abc_cvrp::models::{Trace, Trip};
///
/// let trace = Trace::new(vec![
///     Trip { stops: vec![0, 1, 0], distance: 2.0, load: 1, service_time: 0.0 },
///     Trip { stops: vec![0, 0], distance: 0.0, load: 0, service_time: 0.0 },
/// ]);
/// assert_eq!(trace.num_trips(), 2);
/// assert_eq!(trace.num_used(), 1);
/// assert!((trace.total_distance() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    trips: Vec<Trip>,
}

impl Trace {
    /// Wraps decoded trips.
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    /// Trips in vehicle order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Number of trips (equals the vehicle count).
    pub fn num_trips(&self) -> usize {
        self.trips.len()
    }

    /// Number of trips that serve at least one customer.
    pub fn num_used(&self) -> usize {
        self.trips.iter().filter(|t| !t.is_empty()).count()
    }

    /// Travel distance summed over all trips.
    pub fn total_distance(&self) -> f64 {
        self.trips.iter().map(|t| t.distance).sum()
    }

    /// Load summed over all trips.
    pub fn total_load(&self) -> i32 {
        self.trips.iter().map(|t| t.load).sum()
    }

    /// Depot-to-depot stop lists, one per vehicle.
    pub fn stops(&self) -> Vec<Vec<usize>> {
        self.trips.iter().map(|t| t.stops.clone()).collect()
    }
}
