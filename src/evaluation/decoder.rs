//! Candidate-to-trace decoder.
//!
//! Cuts the permutation left to right: the current vehicle keeps taking
//! customers until the next one would push its load over capacity or its
//! trip (travel, service and the leg home) over the duration limit, then
//! the next vehicle opens. The last vehicle takes whatever remains, so any
//! overflow is concentrated there and shows up as a violation.

use crate::models::{CvrpInstance, Trace, Trip};

/// Splits `customers` into one customer group per vehicle.
///
/// Always returns exactly `instance.vehicles()` groups, some possibly empty.
pub fn split_into_trips(customers: &[usize], instance: &CvrpInstance) -> Vec<Vec<usize>> {
    let vehicles = instance.vehicles();
    let capacity = instance.capacity();
    let duration = instance.duration();
    let service = instance.service_time();
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); vehicles];
    let mut vehicle = 0;
    let mut load: i32 = 0;
    // depot to the last stop, service included, return leg excluded
    let mut elapsed = 0.0;
    let mut last = 0;

    for &cid in customers {
        let demand = instance.demand(cid);
        let closed = elapsed + instance.distance(last, cid) + service + instance.distance(cid, 0);
        let overfull = load + demand > capacity || closed > duration;
        if vehicle + 1 < vehicles && !groups[vehicle].is_empty() && overfull {
            vehicle += 1;
            load = 0;
            elapsed = 0.0;
            last = 0;
        }
        groups[vehicle].push(cid);
        load += demand;
        elapsed += instance.distance(last, cid) + service;
        last = cid;
    }

    groups
}

/// Builds a depot-to-depot trip and its distance, load and service time.
pub fn build_trip(customers: &[usize], instance: &CvrpInstance) -> Trip {
    let mut stops = Vec::with_capacity(customers.len() + 2);
    stops.push(0);
    stops.extend_from_slice(customers);
    stops.push(0);

    let distance = stops.windows(2).map(|w| instance.distance(w[0], w[1])).sum();
    let load = stops.iter().map(|&s| instance.demand(s)).sum();
    let service_time = (stops.len() - 2) as f64 * instance.service_time();

    Trip {
        stops,
        distance,
        load,
        service_time,
    }
}

/// Decodes a candidate into one trip per vehicle.
///
/// Deterministic: the same candidate always yields the same trace.
///
/// # Examples
///
/// ```
/// use abc_cvrp::models::{Customer, CvrpInstance};
/// use abc_cvrp::evaluation::decode;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 1),
///     Customer::new(2, 2.0, 0.0, 1),
///     Customer::new(3, 3.0, 0.0, 1),
/// ];
/// let instance = CvrpInstance::new(customers, 2, 2).unwrap();
///
/// let trace = decode(&[1, 2, 3], &instance);
/// assert_eq!(trace.stops(), vec![vec![0, 1, 2, 0], vec![0, 3, 0]]);
/// ```
pub fn decode(customers: &[usize], instance: &CvrpInstance) -> Trace {
    let trips = split_into_trips(customers, instance)
        .iter()
        .map(|group| build_trip(group, instance))
        .collect();
    Trace::new(trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn unit_line(vehicles: usize, capacity: i32) -> CvrpInstance {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 1),
            Customer::new(2, 2.0, 0.0, 1),
            Customer::new(3, 3.0, 0.0, 1),
            Customer::new(4, 4.0, 0.0, 1),
        ];
        CvrpInstance::new(customers, vehicles, capacity).expect("valid")
    }

    #[test]
    fn test_split_at_capacity() {
        let inst = unit_line(2, 2);
        let trace = decode(&[1, 2, 3, 4], &inst);
        assert_eq!(trace.stops(), vec![vec![0, 1, 2, 0], vec![0, 3, 4, 0]]);
        assert_eq!(trace.trips()[0].load, 2);
        assert_eq!(trace.trips()[1].load, 2);
    }

    #[test]
    fn test_last_vehicle_absorbs_overflow() {
        let inst = unit_line(2, 1);
        let trace = decode(&[1, 2, 3, 4], &inst);
        assert_eq!(trace.stops(), vec![vec![0, 1, 0], vec![0, 2, 3, 4, 0]]);
        assert_eq!(trace.trips()[1].load, 3);
    }

    #[test]
    fn test_unused_vehicles_get_empty_trips() {
        let inst = unit_line(3, 10);
        let trace = decode(&[4, 3, 2, 1], &inst);
        assert_eq!(trace.num_trips(), 3);
        assert_eq!(trace.num_used(), 1);
        assert_eq!(trace.trips()[1].stops, vec![0, 0]);
        assert_eq!(trace.trips()[2].distance, 0.0);
        assert_eq!(trace.trips()[2].service_time, 0.0);
    }

    #[test]
    fn test_oversized_customer_opens_own_trip() {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 5),
            Customer::new(2, 2.0, 0.0, 1),
        ];
        let inst = CvrpInstance::new(customers, 3, 3).expect("valid");
        let trace = decode(&[2, 1], &inst);
        assert_eq!(trace.stops(), vec![vec![0, 2, 0], vec![0, 1, 0], vec![0, 0]]);
    }

    #[test]
    fn test_split_at_duration() {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 10.0, 0.0, 1),
            Customer::new(2, -10.0, 0.0, 1),
        ];
        let inst = CvrpInstance::new(customers, 2, 9999)
            .expect("valid")
            .with_duration(25.0)
            .expect("finite");
        let trace = decode(&[1, 2], &inst);
        assert_eq!(trace.stops(), vec![vec![0, 1, 0], vec![0, 2, 0]]);
        assert!(trace.trips().iter().all(|t| t.distance <= 25.0));
    }

    #[test]
    fn test_duration_cut_counts_service_time() {
        // 0→1→2→4→0 travels 8 and would fit; three stops of 1.5 service make it 12.5
        let inst = unit_line(2, 10)
            .with_duration(10.0)
            .expect("finite")
            .with_service_time(1.5)
            .expect("finite");
        let trace = decode(&[1, 2, 4, 3], &inst);
        assert_eq!(trace.stops(), vec![vec![0, 1, 2, 0], vec![0, 4, 3, 0]]);
        // the second trip is the last vehicle and keeps the overflow
        assert!(trace.trips()[1].distance + trace.trips()[1].service_time > 10.0);
    }

    #[test]
    fn test_trip_metrics() {
        let inst = unit_line(1, 10).with_service_time(2.5).expect("finite");
        let trace = decode(&[1, 3], &inst);
        let trip = &trace.trips()[0];
        // 0→1→3→0 = 1 + 2 + 3
        assert!((trip.distance - 6.0).abs() < 1e-10);
        assert_eq!(trip.load, 2);
        assert!((trip.service_time - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_decode_deterministic() {
        let inst = unit_line(2, 2);
        let a = decode(&[3, 1, 4, 2], &inst);
        let b = decode(&[3, 1, 4, 2], &inst);
        assert_eq!(a, b);
    }
}
