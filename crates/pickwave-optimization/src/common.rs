use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Solver errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// No subset satisfies the constraints
    #[error("Problem is infeasible")]
    Infeasible,

    /// Problem dimension exceeds what the solver accepts
    #[error("Problem too large: {dim} variables, limit is {limit}")]
    TooLarge { dim: usize, limit: usize },

    /// Non-finite cost or coverage values
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}

pub type SolverResult<T> = Result<T, SolverError>;

/// Represents a candidate solution: one 0/1 value per decision variable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Individual {
    pub variables: Array1<f64>,
    pub fitness: f64,
}

impl Individual {
    pub fn new(variables: Array1<f64>, fitness: f64) -> Self {
        Self { variables, fitness }
    }

    /// Indices of the variables set to 1.
    pub fn selected(&self) -> Vec<usize> {
        self.variables
            .iter()
            .enumerate()
            .filter(|&(_, &x)| x > 0.5)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Defines a 0/1 selection problem:
///
/// minimize `Σ cost(i)·x_i`
/// subject to `Σ x_i ≥ min_selected` and `Σ coverage(i)·x_i ≥ min_coverage`.
pub trait Problem: Send + Sync {
    /// Number of variables.
    fn dim(&self) -> usize;

    /// Cost of selecting variable `index`.
    fn cost(&self, index: usize) -> f64;

    /// Coverage contributed by selecting variable `index`.
    fn coverage(&self, _index: usize) -> f64 {
        0.0
    }

    /// Required total coverage.
    fn min_coverage(&self) -> f64 {
        0.0
    }

    /// Required number of selected variables.
    fn min_selected(&self) -> usize {
        1
    }

    /// The objective function to minimize.
    fn objective(&self, variables: &Array1<f64>) -> f64 {
        variables
            .iter()
            .enumerate()
            .filter(|&(_, &x)| x > 0.5)
            .map(|(i, _)| self.cost(i))
            .sum()
    }

    /// Whether an assignment satisfies both constraints.
    fn is_feasible(&self, variables: &Array1<f64>, tolerance: f64) -> bool {
        let mut selected = 0usize;
        let mut covered = 0.0;
        for (i, &x) in variables.iter().enumerate() {
            if x > 0.5 {
                selected += 1;
                covered += self.coverage(i);
            }
        }
        selected >= self.min_selected() && covered + tolerance >= self.min_coverage()
    }

    /// Rejects NaN and infinite inputs before any search starts.
    fn validate(&self) -> SolverResult<()> {
        for i in 0..self.dim() {
            if !self.cost(i).is_finite() {
                return Err(SolverError::InvalidProblem(format!("cost[{}] is not finite", i)));
            }
            if !self.coverage(i).is_finite() {
                return Err(SolverError::InvalidProblem(format!("coverage[{}] is not finite", i)));
            }
        }
        if !self.min_coverage().is_finite() {
            return Err(SolverError::InvalidProblem("min_coverage is not finite".to_string()));
        }
        Ok(())
    }
}

/// Configuration for the solver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Largest dimension the exhaustive solver will enumerate.
    pub max_dim: usize,
    /// Slack applied when comparing coverage against its minimum.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_dim: 20,
            tolerance: 1e-9,
        }
    }
}

/// The result of an optimization run.
#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub best_variables: Array1<f64>,
    pub best_fitness: f64,
    /// Incumbent objective values, in the order they were found.
    pub history: Vec<f64>,
    /// Assignments (or search nodes) examined.
    pub evaluations: u64,
}

impl OptimizationResult {
    /// Indices of the selected variables.
    pub fn selected(&self) -> Vec<usize> {
        Individual::new(self.best_variables.clone(), self.best_fitness).selected()
    }
}

/// A selection problem backed by plain vectors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectionProblem {
    pub costs: Array1<f64>,
    pub coverage: Option<Array1<f64>>,
    pub min_coverage: f64,
    pub min_selected: usize,
}

impl SelectionProblem {
    /// Pick at least one variable, no coverage requirement.
    pub fn new(costs: Array1<f64>) -> Self {
        Self {
            costs,
            coverage: None,
            min_coverage: 0.0,
            min_selected: 1,
        }
    }

    pub fn with_coverage(mut self, coverage: Array1<f64>, min_coverage: f64) -> Self {
        self.coverage = Some(coverage);
        self.min_coverage = min_coverage;
        self
    }

    pub fn with_min_selected(mut self, min_selected: usize) -> Self {
        self.min_selected = min_selected;
        self
    }
}

impl Problem for SelectionProblem {
    fn dim(&self) -> usize {
        self.costs.len()
    }

    fn cost(&self, index: usize) -> f64 {
        self.costs[index]
    }

    fn coverage(&self, index: usize) -> f64 {
        self.coverage
            .as_ref()
            .and_then(|c| c.get(index).copied())
            .unwrap_or(0.0)
    }

    fn min_coverage(&self) -> f64 {
        if self.coverage.is_some() {
            self.min_coverage
        } else {
            0.0
        }
    }

    fn min_selected(&self) -> usize {
        self.min_selected
    }

    fn validate(&self) -> SolverResult<()> {
        if let Some(coverage) = &self.coverage {
            if coverage.len() != self.costs.len() {
                return Err(SolverError::InvalidProblem(format!(
                    "coverage has {} entries, costs has {}",
                    coverage.len(),
                    self.costs.len()
                )));
            }
        }
        for (i, c) in self.costs.iter().enumerate() {
            if !c.is_finite() {
                return Err(SolverError::InvalidProblem(format!("cost[{}] is not finite", i)));
            }
        }
        for i in 0..self.dim() {
            if !self.coverage(i).is_finite() {
                return Err(SolverError::InvalidProblem(format!("coverage[{}] is not finite", i)));
            }
        }
        if !self.min_coverage.is_finite() {
            return Err(SolverError::InvalidProblem("min_coverage is not finite".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_objective_counts_selected_only() {
        let problem = SelectionProblem::new(array![10.0, 20.0, 30.0]);
        assert_eq!(problem.objective(&array![1.0, 0.0, 1.0]), 40.0);
        assert_eq!(problem.objective(&array![0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_feasibility_requires_one_pick() {
        let problem = SelectionProblem::new(array![10.0, 20.0]);
        assert!(!problem.is_feasible(&array![0.0, 0.0], 1e-9));
        assert!(problem.is_feasible(&array![0.0, 1.0], 1e-9));
    }

    #[test]
    fn test_coverage_constraint() {
        let problem = SelectionProblem::new(array![1.0, 1.0, 1.0])
            .with_coverage(array![5.0, 3.0, 2.0], 7.0);
        assert!(!problem.is_feasible(&array![1.0, 0.0, 0.0], 1e-9));
        assert!(problem.is_feasible(&array![1.0, 0.0, 1.0], 1e-9));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let problem = SelectionProblem::new(array![1.0, f64::NAN]);
        assert!(matches!(problem.validate(), Err(SolverError::InvalidProblem(_))));

        let mismatched = SelectionProblem::new(array![1.0, 2.0]).with_coverage(array![1.0], 1.0);
        assert!(matches!(mismatched.validate(), Err(SolverError::InvalidProblem(_))));
    }
}
