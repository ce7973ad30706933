//! Capacitated routing problem instance.

use crate::distance::DistanceMatrix;
use crate::error::{AbcError, Result};

use super::Customer;

/// Capacity used when an instance file does not state one.
pub const DEFAULT_CAPACITY: i32 = 9999;

/// Route duration limit used when an instance file does not state one.
pub const DEFAULT_DURATION: f64 = 9999.0;

/// A resolved CVRP instance, fixed for the duration of a run.
///
/// Every vehicle is identical: it carries at most `capacity` units and its
/// trip (travel distance plus service time) must not exceed `duration`.
///
/// # Examples
///
/// ```
/// use abc_cvrp::models::{Customer, CvrpInstance};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10),
///     Customer::new(2, 6.0, 8.0, 20),
/// ];
/// let instance = CvrpInstance::new(customers, 2, 25)
///     .unwrap()
///     .with_duration(100.0)
///     .unwrap()
///     .with_service_time(5.0)
///     .unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct CvrpInstance {
    name: String,
    customers: Vec<Customer>,
    distances: DistanceMatrix,
    vehicles: usize,
    capacity: i32,
    duration: f64,
    service_time: f64,
    best_known: Option<f64>,
}

impl CvrpInstance {
    /// Creates an instance with Euclidean distances between `customers`.
    ///
    /// `customers[0]` must be the depot and ids must match positions.
    pub fn new(customers: Vec<Customer>, vehicles: usize, capacity: i32) -> Result<Self> {
        let distances = DistanceMatrix::from_customers(&customers);
        Self::with_matrix(customers, distances, vehicles, capacity)
    }

    /// Creates an instance with an explicit distance matrix.
    pub fn with_matrix(
        customers: Vec<Customer>,
        distances: DistanceMatrix,
        vehicles: usize,
        capacity: i32,
    ) -> Result<Self> {
        if customers.len() < 2 {
            return Err(AbcError::InvalidInstance(
                "at least one customer besides the depot is required".into(),
            ));
        }
        if vehicles == 0 {
            return Err(AbcError::InvalidInstance(
                "at least one vehicle is required".into(),
            ));
        }
        if distances.size() != customers.len() {
            return Err(AbcError::InvalidInstance(format!(
                "distance matrix covers {} locations, instance has {}",
                distances.size(),
                customers.len()
            )));
        }
        for (idx, c) in customers.iter().enumerate() {
            if c.id() != idx {
                return Err(AbcError::InvalidInstance(format!(
                    "location at position {idx} has id {}",
                    c.id()
                )));
            }
            if !c.x().is_finite() || !c.y().is_finite() {
                return Err(AbcError::InvalidInstance(format!(
                    "location {idx} has non-finite coordinates ({}, {})",
                    c.x(),
                    c.y()
                )));
            }
            if c.demand() < 0 {
                return Err(AbcError::InvalidInstance(format!(
                    "customer {idx} has negative demand {}",
                    c.demand()
                )));
            }
        }
        if customers[0].demand() != 0 {
            return Err(AbcError::InvalidInstance(
                "depot demand must be zero".into(),
            ));
        }
        let size = distances.size();
        for from in 0..size {
            for to in 0..size {
                let d = distances.get(from, to);
                if !d.is_finite() || d < 0.0 {
                    return Err(AbcError::InvalidInstance(format!(
                        "distance {from}->{to} is {d}"
                    )));
                }
            }
        }
        if distances.is_all_zero() {
            return Err(AbcError::InvalidInstance(
                "all distances are zero, fitness would vanish".into(),
            ));
        }

        Ok(Self {
            name: String::new(),
            customers,
            distances,
            vehicles,
            capacity,
            duration: DEFAULT_DURATION,
            service_time: 0.0,
            best_known: None,
        })
    }

    /// Sets the instance name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the per-vehicle duration limit.
    ///
    /// # Errors
    ///
    /// [`AbcError::InvalidInstance`] if `duration` is negative or not finite.
    pub fn with_duration(mut self, duration: f64) -> Result<Self> {
        self.duration = non_negative("duration", duration)?;
        Ok(self)
    }

    /// Sets the fixed service time spent at every customer.
    ///
    /// # Errors
    ///
    /// [`AbcError::InvalidInstance`] if `service_time` is negative or not finite.
    pub fn with_service_time(mut self, service_time: f64) -> Result<Self> {
        self.service_time = non_negative("service time", service_time)?;
        Ok(self)
    }

    /// Records the best-known objective value for gap reporting.
    pub fn with_best_known(mut self, value: f64) -> Self {
        self.best_known = Some(value);
        self
    }

    /// Instance name (empty if unnamed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All locations (index 0 = depot).
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel distance between two locations.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Demand of a location (0 for the depot).
    pub fn demand(&self, id: usize) -> i32 {
        self.customers[id].demand()
    }

    /// Total demand over all customers.
    pub fn total_demand(&self) -> i32 {
        self.customers.iter().map(Customer::demand).sum()
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len() - 1
    }

    /// Number of vehicles.
    pub fn vehicles(&self) -> usize {
        self.vehicles
    }

    /// Per-vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Per-vehicle duration limit.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Service time per customer stop.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Best-known objective value, if recorded.
    pub fn best_known(&self) -> Option<f64> {
        self.best_known
    }
}

fn non_negative(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AbcError::InvalidInstance(format!(
            "{what} must be finite and non-negative, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_customers() -> Vec<Customer> {
        vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 10),
            Customer::new(2, 2.0, 0.0, 10),
        ]
    }

    #[test]
    fn test_defaults() {
        let inst = CvrpInstance::new(line_customers(), 1, 30).expect("valid");
        assert_eq!(inst.num_customers(), 2);
        assert_eq!(inst.vehicles(), 1);
        assert_eq!(inst.capacity(), 30);
        assert_eq!(inst.duration(), DEFAULT_DURATION);
        assert_eq!(inst.service_time(), 0.0);
        assert_eq!(inst.total_demand(), 20);
        assert!(inst.best_known().is_none());
    }

    #[test]
    fn test_builders() {
        let inst = CvrpInstance::new(line_customers(), 1, 30)
            .expect("valid")
            .with_name("line")
            .with_duration(50.0)
            .expect("finite")
            .with_service_time(2.0)
            .expect("finite")
            .with_best_known(4.0);
        assert_eq!(inst.name(), "line");
        assert_eq!(inst.duration(), 50.0);
        assert_eq!(inst.service_time(), 2.0);
        assert_eq!(inst.best_known(), Some(4.0));
    }

    #[test]
    fn test_rejects_depot_only() {
        let err = CvrpInstance::new(vec![Customer::depot(0.0, 0.0)], 1, 10);
        assert!(matches!(err, Err(AbcError::InvalidInstance(_))));
    }

    #[test]
    fn test_rejects_no_vehicles() {
        assert!(CvrpInstance::new(line_customers(), 0, 10).is_err());
    }

    #[test]
    fn test_rejects_misnumbered_ids() {
        let customers = vec![Customer::depot(0.0, 0.0), Customer::new(2, 1.0, 0.0, 1)];
        assert!(CvrpInstance::new(customers, 1, 10).is_err());
    }

    #[test]
    fn test_rejects_all_zero_distances() {
        let customers = vec![Customer::depot(1.0, 1.0), Customer::new(1, 1.0, 1.0, 1)];
        assert!(CvrpInstance::new(customers, 1, 10).is_err());
    }

    #[test]
    fn test_rejects_matrix_size_mismatch() {
        let dm = DistanceMatrix::new(2);
        assert!(CvrpInstance::with_matrix(line_customers(), dm, 1, 10).is_err());
    }

    #[test]
    fn test_rejects_bad_limits() {
        let inst = || CvrpInstance::new(line_customers(), 1, 30).expect("valid");
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            assert!(matches!(
                inst().with_duration(bad),
                Err(AbcError::InvalidInstance(_))
            ));
            assert!(matches!(
                inst().with_service_time(bad),
                Err(AbcError::InvalidInstance(_))
            ));
        }
        assert!(inst().with_duration(0.0).is_ok());
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, f64::NAN, 0.0, 1),
        ];
        assert!(matches!(
            CvrpInstance::new(customers, 1, 10),
            Err(AbcError::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_rejects_negative_matrix_entry() {
        let mut dm = DistanceMatrix::from_customers(&line_customers());
        dm.set(0, 1, -2.0);
        assert!(CvrpInstance::with_matrix(line_customers(), dm, 1, 10).is_err());
    }
}
