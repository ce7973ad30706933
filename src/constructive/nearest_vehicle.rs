//! Randomized nearest-vehicle constructive heuristic.
//!
//! Customers are drawn in random order. Each one goes to the vehicle whose
//! current position (its last assigned customer, or the depot) is closest,
//! and that vehicle moves there. No capacity or duration check is made:
//! overloaded starts are expected and left to the penalty function.
//!
//! # Complexity
//!
//! O(n·V) per candidate where n = customers, V = vehicles.

use rand::Rng;

use crate::models::{Candidate, CvrpInstance};

/// Assigns every customer to a vehicle, returning one list per vehicle.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use abc_cvrp::models::{Customer, CvrpInstance};
/// use abc_cvrp::constructive::nearest_vehicle_routes;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 1),
///     Customer::new(2, 2.0, 0.0, 1),
/// ];
/// let instance = CvrpInstance::new(customers, 2, 10).unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let routes = nearest_vehicle_routes(&instance, &mut rng);
/// assert_eq!(routes.len(), 2);
/// assert_eq!(routes.iter().map(Vec::len).sum::<usize>(), 2);
/// ```
pub fn nearest_vehicle_routes<R: Rng>(instance: &CvrpInstance, rng: &mut R) -> Vec<Vec<usize>> {
    let vehicles = instance.vehicles();
    let distances = instance.distances();
    let mut positions = vec![0usize; vehicles];
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); vehicles];
    let mut remaining: Vec<usize> = (1..=instance.num_customers()).collect();

    while !remaining.is_empty() {
        let pick = rng.random_range(0..remaining.len());
        let cid = remaining.swap_remove(pick);
        // positions is never empty: instances always have a vehicle
        let vehicle = distances.nearest_position(cid, &positions).unwrap_or(0);
        positions[vehicle] = cid;
        routes[vehicle].push(cid);
    }

    routes
}

/// Builds one candidate by flattening [`nearest_vehicle_routes`] in
/// vehicle order.
pub fn nearest_vehicle<R: Rng>(instance: &CvrpInstance, rng: &mut R) -> Candidate {
    let customers = nearest_vehicle_routes(instance, rng)
        .into_iter()
        .flatten()
        .collect();
    Candidate::new(customers)
}

/// Builds `count` independent candidates.
pub fn initial_candidates<R: Rng>(
    instance: &CvrpInstance,
    count: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    (0..count).map(|_| nearest_vehicle(instance, rng)).collect()
}
