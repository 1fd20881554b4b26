use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;
use pickwave::analytics::mine_copick_rules;
use pickwave::{ColumnSynonyms, RuleConfig, Table, Value};
use pickwave_optimization::algorithms::{BranchAndBoundSolver, EnumerationSolver};
use pickwave_optimization::{SelectionProblem, SolverConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picking table with `waves` waves of up to 8 SKUs drawn from `skus`
fn picking_table(waves: usize, skus: usize) -> Table {
    let mut rng = StdRng::seed_from_u64(7);
    let mut table = Table::new(
        "picking_wave",
        vec!["WaveNumber".to_string(), "SKU".to_string(), "Quantity".to_string()],
    );
    for wave in 0..waves {
        for _ in 0..rng.gen_range(1..=8) {
            let sku = rng.gen_range(0..skus);
            table
                .push_row(vec![
                    Value::from(format!("W{}", wave)),
                    Value::from(format!("SKU{:04}", sku)),
                    Value::Integer(rng.gen_range(1..20)),
                ])
                .unwrap();
        }
    }
    table
}

/// Benchmark co-pick rule mining over picking waves
fn bench_copick_mining(c: &mut Criterion) {
    let mut group = c.benchmark_group("copick_mining");
    let synonyms = ColumnSynonyms::default();
    let config = RuleConfig::default();

    for waves in [1_000, 10_000, 50_000].iter() {
        let table = picking_table(*waves, 200);
        group.bench_with_input(BenchmarkId::from_parameter(waves), waves, |b, _| {
            b.iter(|| {
                let rules = mine_copick_rules(&table, &synonyms, &config).unwrap();
                criterion::black_box(rules.len());
            });
        });
    }
    group.finish();
}

/// Benchmark exact facility selection with a coverage constraint
fn bench_facility_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("facility_selection");

    for dim in [10, 16, 20].iter() {
        let mut rng = StdRng::seed_from_u64(*dim as u64);
        let costs: Vec<f64> = (0..*dim).map(|_| rng.gen_range(10..100) as f64).collect();
        let coverage: Vec<f64> = (0..*dim).map(|_| rng.gen_range(20..120) as f64).collect();
        let target = coverage.iter().sum::<f64>() * 0.4;
        let problem = SelectionProblem::new(Array1::from(costs)).with_coverage(Array1::from(coverage), target);

        group.bench_with_input(BenchmarkId::new("branch_and_bound", dim), dim, |b, _| {
            let solver = BranchAndBoundSolver::new(SolverConfig::default());
            b.iter(|| criterion::black_box(solver.solve(&problem).unwrap().best_fitness));
        });
        group.bench_with_input(BenchmarkId::new("enumeration", dim), dim, |b, _| {
            let solver = EnumerationSolver::new(SolverConfig::default());
            b.iter(|| criterion::black_box(solver.solve(&problem).unwrap().best_fitness));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_copick_mining, bench_facility_selection);
criterion_main!(benches);
