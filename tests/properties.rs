use abc_cvrp::abc::{
    exploit, scout, AbcConfig, PenaltyController, Population, ScoutPolicy, SearchState, Variant,
};
use abc_cvrp::constructive::nearest_vehicle_routes;
use abc_cvrp::evaluation::{decode, CostFunction, Penalty};
use abc_cvrp::models::{Candidate, Customer, CvrpInstance};
use abc_cvrp::neighborhood::{reversal_at, Operator};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sorted(v: &[usize]) -> Vec<usize> {
    let mut s = v.to_vec();
    s.sort_unstable();
    s
}

prop_compose! {
    fn instance_strategy(min: usize, max: usize)
    (points in prop::collection::vec((0.0..100.0f64, 0.0..100.0f64, 1..10i32), min..=max),
     vehicles in 1..5usize,
     capacity in 5..40i32,
     duration in prop::option::of(50.0..400.0f64))
    -> CvrpInstance {
        let mut customers = vec![Customer::depot(50.0, 50.0)];
        for (i, &(x, y, d)) in points.iter().enumerate() {
            // nudge off the depot so no instance is all zero distances
            customers.push(Customer::new(i + 1, x + 0.5, y, d));
        }
        let instance = CvrpInstance::new(customers, vehicles, capacity).expect("valid");
        match duration {
            Some(limit) => instance
                .with_duration(limit)
                .and_then(|i| i.with_service_time(2.0))
                .expect("finite limits"),
            None => instance,
        }
    }
}

prop_compose! {
    fn instance_and_candidate(min: usize, max: usize)
    (instance in instance_strategy(min, max))
    (order in Just((1..=instance.num_customers()).collect::<Vec<usize>>()).prop_shuffle(),
     instance in Just(instance))
    -> (CvrpInstance, Candidate) {
        (instance, Candidate::new(order))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn operators_preserve_permutation(
        order in Just((1..=15usize).collect::<Vec<_>>()).prop_shuffle(),
        op_id in 1..=7u8,
        seed in any::<u64>(),
    ) {
        let op = Operator::try_from(op_id).expect("valid id");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut current = order.clone();
        for _ in 0..20 {
            current = op.apply(&current, &mut rng).expect("long enough");
            prop_assert_eq!(current.len(), order.len());
            prop_assert_eq!(sorted(&current), sorted(&order));
        }
    }

    #[test]
    fn decoding_is_deterministic((instance, candidate) in instance_and_candidate(1, 25)) {
        let a = decode(candidate.customers(), &instance);
        let b = decode(candidate.customers(), &instance);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.num_trips(), instance.vehicles());
        prop_assert_eq!(a.total_load(), instance.total_demand());
        let visited: Vec<usize> = a.trips().iter().flat_map(|t| t.customers().to_vec()).collect();
        prop_assert_eq!(visited, candidate.customers().to_vec());
        for trip in a.trips() {
            prop_assert_eq!(trip.stops.first(), Some(&0));
            prop_assert_eq!(trip.stops.last(), Some(&0));
        }
    }

    #[test]
    fn feasible_fitness_is_distance(
        (instance, candidate) in instance_and_candidate(1, 20),
        alpha in 0.0..1000.0f64,
        beta in 0.0..1000.0f64,
    ) {
        let cost = CostFunction::new(&instance);
        let eval = cost.evaluate(&candidate);
        prop_assert!(eval.capacity_violation >= 0.0);
        prop_assert!(eval.duration_violation >= 0.0);
        if eval.is_feasible() {
            prop_assert_eq!(eval.fitness(Penalty::new(alpha, beta)), eval.distance);
        } else {
            prop_assert!(eval.fitness(Penalty::new(alpha, beta)) >= eval.distance);
        }
    }

    #[test]
    fn constructive_assigns_every_customer_once(
        instance in instance_strategy(1, 30),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let routes = nearest_vehicle_routes(&instance, &mut rng);
        prop_assert_eq!(routes.len(), instance.vehicles());
        let all: Vec<usize> = routes.concat();
        prop_assert_eq!(sorted(&all), (1..=instance.num_customers()).collect::<Vec<_>>());
    }

    #[test]
    fn exploitation_never_worsens(instance in instance_strategy(7, 20), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let penalty = Penalty::new(0.1, 0.1);
        let cost = CostFunction::new(&instance);
        let mut pop = Population::initialize(&instance, 10, penalty, &mut rng);
        let before = pop.fitnesses();
        exploit(&mut pop, &cost, &Operator::ALL, penalty, &mut rng).expect("long enough");
        for (after, before) in pop.fitnesses().iter().zip(&before) {
            prop_assert!(after <= before);
        }
    }

    #[test]
    fn penalty_moves_in_the_right_direction(
        instance in instance_strategy(7, 20),
        seed in any::<u64>(),
        delta in 0.001..0.5f64,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = Penalty::new(0.3, 0.7);
        let mut pop = Population::initialize(&instance, 9, start, &mut rng);
        let mut ctl = PenaltyController::new(start, delta);
        let counts = ctl.update(&mut pop);
        if counts.capacity > pop.len() / 2 {
            prop_assert!(ctl.penalty().alpha > start.alpha);
        } else {
            prop_assert!(ctl.penalty().alpha < start.alpha);
        }
        if counts.duration > pop.len() / 2 {
            prop_assert!(ctl.penalty().beta > start.beta);
        } else {
            prop_assert!(ctl.penalty().beta < start.beta);
        }
        for s in pop.sources() {
            prop_assert_eq!(s.fitness, s.evaluation.fitness(ctl.penalty()));
        }
    }

    #[test]
    fn scouts_reset_stagnated_sources(
        instance in instance_strategy(7, 15),
        trials in prop::collection::vec(0..20usize, 8),
        limit in 1..15usize,
        perturb in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let penalty = Penalty::new(0.1, 0.1);
        let mut pop = Population::initialize(&instance, trials.len(), penalty, &mut rng);
        for (s, &t) in pop.sources_mut().iter_mut().zip(&trials) {
            s.trials = t;
        }
        let policy = if perturb { ScoutPolicy::Perturb } else { ScoutPolicy::Reconstruct };
        let abandoned = scout(&mut pop, &instance, &Operator::ALL, policy, limit, penalty, &mut rng)
            .expect("long enough");
        for (k, &t) in trials.iter().enumerate() {
            if t > limit {
                prop_assert_eq!(pop[k].trials, 0);
                prop_assert!(abandoned.contains(&k));
            } else {
                prop_assert_eq!(pop[k].trials, t);
            }
            prop_assert!(pop[k].candidate.is_permutation_of(instance.num_customers()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn best_series_never_increase(
        instance in instance_strategy(7, 14),
        variant_idx in 0..3usize,
        seed in any::<u64>(),
    ) {
        let config = AbcConfig::default()
            .with_food_sources(6)
            .with_stagnation_limit(4)
            .with_variant(Variant::ALL[variant_idx]);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = SearchState::new(&instance, &config, &mut rng).expect("valid");
        for _ in 0..25 {
            state.step(&mut rng).expect("step");
        }
        let overall = state.tracker().overall_history();
        prop_assert!(overall.windows(2).all(|w| w[1] <= w[0]));
        let feasible = state.tracker().feasible_history();
        for w in feasible.windows(2) {
            match (w[0], w[1]) {
                (Some(a), Some(b)) => prop_assert!(b <= a),
                (Some(_), None) => prop_assert!(false, "feasible best was lost"),
                _ => {}
            }
        }
    }
}

#[test]
fn cross_instance_is_fully_assigned() {
    init_tracing();
    let customers = vec![
        Customer::depot(0.0, 0.0),
        Customer::new(1, 1.0, 0.0, 1),
        Customer::new(2, 2.0, 0.0, 1),
        Customer::new(3, 0.0, 1.0, 1),
        Customer::new(4, 0.0, 2.0, 1),
    ];
    let instance = CvrpInstance::new(customers, 2, 100).expect("valid");

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let routes = nearest_vehicle_routes(&instance, &mut rng);
        let all = routes.concat();
        assert_eq!(all.len(), 4);
        assert_eq!(sorted(&all), vec![1, 2, 3, 4]);

        let candidate = Candidate::new(all);
        let trace = decode(candidate.customers(), &instance);
        assert_eq!(trace.total_load(), 4);
        assert_eq!(trace.num_trips(), 2);
    }
}

#[test]
fn reversal_of_middle_pair() {
    assert_eq!(reversal_at(&[1, 2, 3, 4], 1, 2), vec![1, 3, 2, 4]);
}

#[test]
fn full_run_on_cross_instance() {
    init_tracing();
    let customers = vec![
        Customer::depot(0.0, 0.0),
        Customer::new(1, 1.0, 0.0, 1),
        Customer::new(2, 2.0, 0.0, 1),
        Customer::new(3, 0.0, 1.0, 1),
        Customer::new(4, 0.0, 2.0, 1),
    ];
    let instance = CvrpInstance::new(customers, 2, 2).expect("valid");
    let config = AbcConfig::for_customers(4)
        .with_operators(vec![Operator::Swap, Operator::Insertion, Operator::Reversal])
        .with_food_sources(10)
        .with_iterations(300)
        .with_seed(2);
    let outcome = abc_cvrp::abc::AbcRunner::run(&instance, &config).expect("run");
    let best = outcome.best_feasible.expect("two arms of two fit two vehicles");
    // 0-1-2-0 and 0-3-4-0, each 4 long
    assert!((best.distance - 8.0).abs() < 1e-9, "got {}", best.distance);
}

#[test]
fn full_run_with_binding_duration() {
    init_tracing();
    let customers = vec![
        Customer::depot(0.0, 0.0),
        Customer::new(1, 1.0, 0.0, 1),
        Customer::new(2, 2.0, 0.0, 1),
        Customer::new(3, 0.0, 1.0, 1),
        Customer::new(4, 0.0, 2.0, 1),
    ];
    // capacity never binds; only the two straight arms fit a duration of 4
    let instance = CvrpInstance::new(customers, 2, 100)
        .expect("valid")
        .with_duration(4.0)
        .expect("finite");
    for variant in Variant::ALL {
        let config = AbcConfig::for_customers(4)
            .with_variant(variant)
            .with_operators(vec![Operator::Swap, Operator::Insertion, Operator::Reversal])
            .with_food_sources(10)
            .with_iterations(300)
            .with_seed(3);
        let outcome = abc_cvrp::abc::AbcRunner::run(&instance, &config).expect("run");
        let best = outcome.best_feasible.expect("the arms split across both vehicles");
        assert!((best.distance - 8.0).abs() < 1e-9, "got {}", best.distance);
        assert_eq!(best.trace.num_used(), 2);
        for trip in best.trace.trips() {
            assert!(trip.distance + trip.service_time <= 4.0 + 1e-9);
        }
    }
}
