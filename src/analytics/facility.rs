//! Facility selection over storage rows
//!
//! Chooses the cheapest non-empty subset of the first `max_candidates`
//! storage rows, optionally subject to a minimum total coverage (for
//! example summed capacity). The solvers are exact, so the reported score
//! is the global optimum.

use crate::stage::{StageError, StageResult};
use crate::table::Table;
use ndarray::Array1;
use pickwave_optimization::algorithms::{BranchAndBoundSolver, EnumerationSolver};
use pickwave_optimization::{SelectionProblem, SolverConfig, SolverError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Synthetic weights are drawn from `[SYNTHETIC_COST_MIN, SYNTHETIC_COST_MAX)`
const SYNTHETIC_COST_MIN: i64 = 10;
const SYNTHETIC_COST_MAX: i64 = 100;

/// Where per-row costs come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Random integer weights; no distance data is supplied with the extracts
    #[default]
    Synthetic,
    /// Numeric column of the storage table; unusable cells fall back to a synthetic weight
    Column(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    #[default]
    BranchAndBound,
    Enumeration,
}

impl SolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::BranchAndBound => "branch_and_bound",
            SolverKind::Enumeration => "enumeration",
        }
    }
}

/// Facility selection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityConfig {
    /// Candidate rows considered, from the top of the table
    pub max_candidates: usize,
    pub cost: CostModel,
    /// Fixes the synthetic draw
    pub seed: Option<u64>,
    /// Numeric column summed over the selection
    pub coverage_column: Option<String>,
    pub min_coverage: f64,
    pub solver: SolverKind,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            cost: CostModel::Synthetic,
            seed: None,
            coverage_column: None,
            min_coverage: 0.0,
            solver: SolverKind::BranchAndBound,
        }
    }
}

/// Optimal selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilitySelection {
    /// Minimal total cost
    pub score: f64,
    /// Selected row indices, ascending
    pub selected_rows: Vec<usize>,
    /// Cost assigned to each candidate row
    pub costs: Vec<f64>,
    pub solver: &'static str,
    pub evaluations: u64,
}

/// Per-candidate costs under the configured model
pub fn assign_costs(storage: &Table, candidates: usize, config: &FacilityConfig) -> Vec<f64> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut synthetic = move || rng.gen_range(SYNTHETIC_COST_MIN..SYNTHETIC_COST_MAX) as f64;

    (0..candidates)
        .map(|row| match &config.cost {
            CostModel::Synthetic => synthetic(),
            CostModel::Column(column) => storage
                .get(row, column)
                .and_then(|v| v.as_f64())
                .filter(|c| c.is_finite())
                .unwrap_or_else(&mut synthetic),
        })
        .collect()
}

/// Solve the selection problem for the given costs.
pub fn select_with_costs(
    storage: &Table,
    costs: Vec<f64>,
    config: &FacilityConfig,
) -> StageResult<FacilitySelection> {
    let candidates = costs.len();
    let mut problem = SelectionProblem::new(Array1::from(costs.clone()));

    if let Some(column) = &config.coverage_column {
        if !storage.has_column(column) {
            return Err(StageError::MissingColumn {
                table: storage.name().to_string(),
                field: "coverage".to_string(),
                candidates: vec![column.clone()],
            });
        }
        let coverage: Vec<f64> = (0..candidates)
            .map(|row| storage.get(row, column).and_then(|v| v.as_f64()).unwrap_or(0.0))
            .collect();
        problem = problem.with_coverage(Array1::from(coverage), config.min_coverage);
    }

    let solver_config = SolverConfig::default();
    let solved = match config.solver {
        SolverKind::BranchAndBound => BranchAndBoundSolver::new(solver_config).solve(&problem),
        SolverKind::Enumeration => EnumerationSolver::new(solver_config).solve(&problem),
    };

    let result = solved.map_err(|e| match e {
        SolverError::Infeasible => StageError::SolverInfeasible,
        other => StageError::SolverError(other.to_string()),
    })?;

    debug!("Selection explored {} candidates/nodes", result.evaluations);

    Ok(FacilitySelection {
        score: result.best_fitness,
        selected_rows: result.selected(),
        costs,
        solver: config.solver.as_str(),
        evaluations: result.evaluations,
    })
}

/// Run facility selection over the storage table.
pub fn select_facilities(storage: &Table, config: &FacilityConfig) -> StageResult<FacilitySelection> {
    if storage.is_empty() {
        return Err(StageError::EmptyInput(storage.name().to_string()));
    }

    let candidates = storage.len().min(config.max_candidates);
    let costs = assign_costs(storage, candidates, config);
    let selection = select_with_costs(storage, costs, config)?;

    info!(
        "Facility selection optimal score {:.2} over {} candidates ({} selected)",
        selection.score,
        candidates,
        selection.selected_rows.len()
    );
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn storage(rows: usize) -> Table {
        let data = (0..rows)
            .map(|i| {
                vec![
                    Value::from(format!("L{}", i)),
                    Value::Integer(100 + i as i64),
                    Value::Float(5.0 * (i as f64 + 1.0)),
                ]
            })
            .collect();
        Table::from_rows("storage", ["Location", "Capacity", "Distance"], data).unwrap()
    }

    #[test]
    fn test_empty_storage_is_skipped() {
        let err = select_facilities(&Table::empty("storage"), &FacilityConfig::default()).unwrap_err();
        assert_eq!(err, StageError::EmptyInput("storage".to_string()));
    }

    #[test]
    fn test_synthetic_costs_in_range_and_seeded() {
        let config = FacilityConfig { seed: Some(42), ..FacilityConfig::default() };
        let table = storage(25);
        let a = assign_costs(&table, 10, &config);
        let b = assign_costs(&table, 10, &config);
        assert_eq!(a, b);
        assert!(a.iter().all(|&c| (10.0..100.0).contains(&c) && c.fract() == 0.0));
    }

    #[test]
    fn test_candidates_capped_at_ten() {
        let config = FacilityConfig { seed: Some(1), ..FacilityConfig::default() };
        let selection = select_facilities(&storage(25), &config).unwrap();
        assert_eq!(selection.costs.len(), 10);
        let cheapest = selection.costs.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(selection.score, cheapest);
        assert_eq!(selection.selected_rows.len(), 1);
    }

    #[test]
    fn test_column_costs_with_coverage() {
        let config = FacilityConfig {
            cost: CostModel::Column("Distance".to_string()),
            coverage_column: Some("Capacity".to_string()),
            min_coverage: 250.0,
            ..FacilityConfig::default()
        };
        // Distances 5, 10, 15, ...; capacities 100, 101, 102, ...
        let selection = select_facilities(&storage(4), &config).unwrap();
        assert_eq!(selection.costs, vec![5.0, 10.0, 15.0, 20.0]);
        assert_eq!(selection.selected_rows, vec![0, 1, 2]);
        assert_eq!(selection.score, 30.0);
    }

    #[test]
    fn test_infeasible_coverage() {
        let config = FacilityConfig {
            coverage_column: Some("Capacity".to_string()),
            min_coverage: 1_000_000.0,
            seed: Some(3),
            ..FacilityConfig::default()
        };
        let err = select_facilities(&storage(3), &config).unwrap_err();
        assert_eq!(err, StageError::SolverInfeasible);
    }

    #[test]
    fn test_missing_coverage_column() {
        let config = FacilityConfig {
            coverage_column: Some("Volume".to_string()),
            ..FacilityConfig::default()
        };
        let err = select_facilities(&storage(3), &config).unwrap_err();
        assert_eq!(err.kind(), "missing_column");
    }
}
