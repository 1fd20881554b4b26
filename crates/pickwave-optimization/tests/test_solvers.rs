use pickwave_optimization::algorithms::*;
use pickwave_optimization::common::*;
use ndarray::{Array1, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reference answer: cheapest feasible subset by plain iteration over masks.
fn brute_force(costs: &[f64], coverage: Option<&[f64]>, min_coverage: f64) -> Option<f64> {
    let n = costs.len();
    let mut best: Option<f64> = None;
    for mask in 1usize..(1 << n) {
        let mut cost = 0.0;
        let mut covered = 0.0;
        for i in 0..n {
            if mask & (1 << i) != 0 {
                cost += costs[i];
                if let Some(c) = coverage {
                    covered += c[i];
                }
            }
        }
        if coverage.is_some() && covered + 1e-9 < min_coverage {
            continue;
        }
        best = Some(best.map_or(cost, |b: f64| b.min(cost)));
    }
    best
}

fn random_costs(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(10..100) as f64).collect()
}

#[test]
fn test_solvers_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..=10 {
        for _ in 0..5 {
            let costs = random_costs(&mut rng, n);
            let problem = SelectionProblem::new(Array1::from(costs.clone()));
            let expected = brute_force(&costs, None, 0.0).unwrap();

            let enumerated = EnumerationSolver::new(SolverConfig::default()).solve(&problem).unwrap();
            let bnb = BranchAndBoundSolver::new(SolverConfig::default()).solve(&problem).unwrap();

            assert_eq!(enumerated.best_fitness, expected, "enumeration mismatch for {:?}", costs);
            assert_eq!(bnb.best_fitness, expected, "branch and bound mismatch for {:?}", costs);
            assert!(!enumerated.selected().is_empty());
            assert!(!bnb.selected().is_empty());
        }
    }
}

#[test]
fn test_solvers_match_brute_force_with_coverage() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 2..=10 {
        for _ in 0..5 {
            let costs = random_costs(&mut rng, n);
            let coverage: Vec<f64> = (0..n).map(|_| rng.gen_range(0..50) as f64).collect();
            let total: f64 = coverage.iter().sum();
            let min_coverage = (total * 0.6).floor();

            let problem = SelectionProblem::new(Array1::from(costs.clone()))
                .with_coverage(Array1::from(coverage.clone()), min_coverage);
            let expected = brute_force(&costs, Some(&coverage), min_coverage);

            let enumerated = EnumerationSolver::new(SolverConfig::default()).solve(&problem);
            let bnb = BranchAndBoundSolver::new(SolverConfig::default()).solve(&problem);

            match expected {
                Some(value) => {
                    let enumerated = enumerated.unwrap();
                    let bnb = bnb.unwrap();
                    assert_eq!(enumerated.best_fitness, value);
                    assert_eq!(bnb.best_fitness, value);
                    assert!(problem.is_feasible(&enumerated.best_variables, 1e-9));
                    assert!(problem.is_feasible(&bnb.best_variables, 1e-9));
                }
                None => {
                    assert_eq!(enumerated.unwrap_err(), SolverError::Infeasible);
                    assert_eq!(bnb.unwrap_err(), SolverError::Infeasible);
                }
            }
        }
    }
}

#[test]
fn test_branch_and_bound_handles_large_dimension() {
    // Well past the enumeration limit; single cheapest is still optimal
    let costs: Vec<f64> = (0..200).map(|i| 1000.0 - i as f64).collect();
    let problem = SelectionProblem::new(Array1::from(costs));

    let result = BranchAndBoundSolver::new(SolverConfig::default()).solve(&problem).unwrap();
    assert_eq!(result.best_fitness, 801.0);
    assert_eq!(result.selected(), vec![199]);

    let err = EnumerationSolver::new(SolverConfig::default()).solve(&problem).unwrap_err();
    assert!(matches!(err, SolverError::TooLarge { dim: 200, .. }));
}

#[test]
fn test_min_selected_above_one() {
    let problem = SelectionProblem::new(array![5.0, 1.0, 3.0, 2.0]).with_min_selected(3);
    let enumerated = EnumerationSolver::new(SolverConfig::default()).solve(&problem).unwrap();
    let bnb = BranchAndBoundSolver::new(SolverConfig::default()).solve(&problem).unwrap();
    assert_eq!(enumerated.best_fitness, 6.0);
    assert_eq!(bnb.best_fitness, 6.0);
    assert_eq!(bnb.selected(), vec![1, 2, 3]);
}
