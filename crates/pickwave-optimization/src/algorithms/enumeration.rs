use crate::common::{OptimizationResult, Problem, SolverConfig, SolverError, SolverResult};
use ndarray::Array1;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Exhaustive search over every 0/1 assignment.
///
/// Masks are evaluated in parallel. Among equal-cost optima the one with the
/// fewest picks wins, then the lowest mask, so the answer does not depend on
/// thread scheduling.
pub struct EnumerationSolver {
    pub config: SolverConfig,
}

impl EnumerationSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn solve<P: Problem>(&self, problem: &P) -> SolverResult<OptimizationResult> {
        problem.validate()?;
        let dim = problem.dim();
        let limit = self.config.max_dim.min(usize::BITS as usize - 1);
        if dim > limit {
            return Err(SolverError::TooLarge { dim, limit });
        }

        let total: usize = 1 << dim;
        let tolerance = self.config.tolerance;

        let best = (0..total)
            .into_par_iter()
            .filter_map(|mask| {
                let mut cost = 0.0;
                let mut covered = 0.0;
                let mut selected = 0usize;
                for i in 0..dim {
                    if mask & (1 << i) != 0 {
                        cost += problem.cost(i);
                        covered += problem.coverage(i);
                        selected += 1;
                    }
                }
                let feasible = selected >= problem.min_selected()
                    && covered + tolerance >= problem.min_coverage();
                feasible.then_some((cost, mask))
            })
            .min_by(|a, b| compare_candidates(*a, *b));

        let (best_cost, best_mask) = best.ok_or(SolverError::Infeasible)?;

        let mut variables = Array1::zeros(dim);
        for i in 0..dim {
            if best_mask & (1 << i) != 0 {
                variables[i] = 1.0;
            }
        }

        tracing::debug!(dim, masks = total, best_cost, "enumeration finished");

        Ok(OptimizationResult {
            best_variables: variables,
            best_fitness: best_cost,
            history: vec![best_cost],
            evaluations: total as u64,
        })
    }
}

fn compare_candidates(a: (f64, usize), b: (f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0)
        .then(a.1.count_ones().cmp(&b.1.count_ones()))
        .then(a.1.cmp(&b.1))
}
