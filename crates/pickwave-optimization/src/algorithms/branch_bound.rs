use crate::common::{OptimizationResult, Problem, SolverConfig, SolverError, SolverResult};
use ndarray::Array1;

/// Depth-first branch and bound.
///
/// Variables are visited in ascending cost order. A branch is cut when its
/// cost lower bound cannot beat the incumbent, when the remaining variables
/// cannot reach the coverage minimum, or when too few variables remain to
/// meet the pick minimum.
pub struct BranchAndBoundSolver {
    pub config: SolverConfig,
}

impl BranchAndBoundSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn solve<P: Problem>(&self, problem: &P) -> SolverResult<OptimizationResult> {
        problem.validate()?;
        let dim = problem.dim();

        let mut order: Vec<usize> = (0..dim).collect();
        order.sort_by(|&a, &b| problem.cost(a).total_cmp(&problem.cost(b)));

        let costs: Vec<f64> = order.iter().map(|&i| problem.cost(i)).collect();
        let coverage: Vec<f64> = order.iter().map(|&i| problem.coverage(i)).collect();

        // Suffix sums: best-case cost and coverage still obtainable from position i onward
        let mut negative_cost_tail = vec![0.0; dim + 1];
        let mut positive_coverage_tail = vec![0.0; dim + 1];
        for i in (0..dim).rev() {
            negative_cost_tail[i] = negative_cost_tail[i + 1] + costs[i].min(0.0);
            positive_coverage_tail[i] = positive_coverage_tail[i + 1] + coverage[i].max(0.0);
        }

        let mut search = Search {
            dim,
            costs,
            coverage,
            negative_cost_tail,
            positive_coverage_tail,
            min_selected: problem.min_selected(),
            min_coverage: problem.min_coverage(),
            tolerance: self.config.tolerance,
            current: vec![false; dim],
            best: None,
            best_cost: f64::INFINITY,
            history: Vec::new(),
            nodes: 0,
        };
        search.branch(0, 0.0, 0.0, 0);

        let best = search.best.ok_or(SolverError::Infeasible)?;

        let mut variables = Array1::zeros(dim);
        for (pos, &picked) in best.iter().enumerate() {
            if picked {
                variables[order[pos]] = 1.0;
            }
        }

        tracing::debug!(dim, nodes = search.nodes, best_cost = search.best_cost, "branch and bound finished");

        Ok(OptimizationResult {
            best_variables: variables,
            best_fitness: search.best_cost,
            history: search.history,
            evaluations: search.nodes,
        })
    }
}

struct Search {
    dim: usize,
    costs: Vec<f64>,
    coverage: Vec<f64>,
    negative_cost_tail: Vec<f64>,
    positive_coverage_tail: Vec<f64>,
    min_selected: usize,
    min_coverage: f64,
    tolerance: f64,
    current: Vec<bool>,
    best: Option<Vec<bool>>,
    best_cost: f64,
    history: Vec<f64>,
    nodes: u64,
}

impl Search {
    fn branch(&mut self, pos: usize, cost: f64, covered: f64, selected: usize) {
        self.nodes += 1;

        if self.best.is_some() && cost + self.negative_cost_tail[pos] >= self.best_cost {
            return;
        }
        if covered + self.positive_coverage_tail[pos] + self.tolerance < self.min_coverage {
            return;
        }
        if selected + (self.dim - pos) < self.min_selected {
            return;
        }

        if pos == self.dim {
            // Bounds above already guarantee feasibility and strict improvement
            self.best_cost = cost;
            self.best = Some(self.current.clone());
            self.history.push(cost);
            return;
        }

        self.current[pos] = true;
        self.branch(pos + 1, cost + self.costs[pos], covered + self.coverage[pos], selected + 1);
        self.current[pos] = false;
        self.branch(pos + 1, cost, covered, selected);
    }
}
