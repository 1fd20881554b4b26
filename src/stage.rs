//! Stage failure kinds
//!
//! Every analytics stage returns a `StageResult`. The pipeline turns an
//! error into that stage's empty or absent output and keeps going.

use serde::Serialize;
use thiserror::Error;

/// Stage errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    /// None of the accepted spellings of a column exist
    #[error("Missing column in {table}: {field} (tried {candidates:?})")]
    MissingColumn {
        table: String,
        field: String,
        candidates: Vec<String>,
    },

    /// Table has no rows
    #[error("Table {0} has no rows")]
    EmptyInput(String),

    /// Solver proved no selection satisfies the constraints
    #[error("No feasible selection")]
    SolverInfeasible,

    /// Solver rejected the problem or failed
    #[error("Solver error: {0}")]
    SolverError(String),

    /// Previous run's document could not be read
    #[error("Prior state unreachable: {0}")]
    UnreachablePriorState(String),
}

pub type StageResult<T> = Result<T, StageError>;

impl StageError {
    pub fn kind(&self) -> &'static str {
        match self {
            StageError::MissingColumn { .. } => "missing_column",
            StageError::EmptyInput(_) => "empty_input",
            StageError::SolverInfeasible => "solver_infeasible",
            StageError::SolverError(_) => "solver_error",
            StageError::UnreachablePriorState(_) => "unreachable_prior_state",
        }
    }
}

/// Outcome of one stage, as recorded in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageStatus {
    pub stage: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StageStatus {
    pub fn ok(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            ok: true,
            error_kind: None,
            message: None,
        }
    }

    pub fn degraded(stage: &str, error: &StageError) -> Self {
        Self {
            stage: stage.to_string(),
            ok: false,
            error_kind: Some(error.kind().to_string()),
            message: Some(error.to_string()),
        }
    }
}
