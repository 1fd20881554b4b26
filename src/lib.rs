//! Pickwave
//!
//! Daily warehouse analytics over four CSV extracts (picking waves, product
//! master, storage slots, support points), producing one JSON report for
//! downstream automation.
//!
//! # Stages
//!
//! - Facility selection: exact minimum-cost subset of storage slots
//! - Slotting: SKU counts per product category
//! - Co-pick mining: pairwise association rules over picking-wave baskets
//! - Slot relocation: most-picked SKUs mapped to the most central slots
//! - Schema fingerprinting and drift detection against the previous report
//! - Automation readiness score and triggers
//!
//! Every stage is fault-isolated: a failure degrades that stage's output
//! and is recorded in the report's `stage_status`.
//!
//! ## Example Usage
//!
//! ```rust
//! use pickwave::{Datasets, Inputs, Pipeline, PipelineConfig, PriorState, Table, Value};
//!
//! let mut datasets = Datasets::empty();
//! datasets.product = Table::from_rows(
//!     "product",
//!     ["SKU", "Category"],
//!     vec![
//!         vec![Value::from("S1"), Value::from("Frozen")],
//!         vec![Value::from("S2"), Value::from("Frozen")],
//!         vec![Value::from("S3"), Value::from("Dry")],
//!     ],
//! )
//! .unwrap();
//!
//! let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
//! let report = pipeline.analyze(&Inputs::new(datasets), &PriorState::Unreachable("first run".into()));
//!
//! assert_eq!(report.data_summary.slotting_result_sample[0].category, "Frozen");
//! assert!(report.data_summary.optimized_distance_score.is_none());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod analytics;
pub mod config;
pub mod pipeline;
pub mod prior;
pub mod report;
pub mod schema;
pub mod scoring;
pub mod stage;
pub mod table;

// Re-export main types for convenience
pub use analytics::{
    CategoryCount, CostModel, DataSummary, FacilityConfig, FacilitySelection, RelocationSuggestion,
    SolverKind, Validation, ValidationFlags,
};

pub use config::{ConfigError, ConfigResult, PipelineConfig};

pub use pipeline::{Datasets, Inputs, Pipeline, PipelineError, PipelineResult, PriorState};

pub use prior::{
    source_for, FileDocumentSource, HttpDocumentSource, InMemoryDocumentSource, NoPriorDocument,
    PriorDocumentSource, PriorStateError, PriorStateResult,
};

pub use report::{write_report, Report, ReportError, ReportResult};

pub use schema::{DriftReport, SchemaFingerprint, TableFingerprint};

pub use scoring::{AutomationIntelligence, Trigger, TriggerKind};

pub use stage::{StageError, StageResult, StageStatus};

pub use table::{ColumnSynonyms, Table, TableError, TableKind, TableResult, TableSource, Value};

pub use pickwave_mining::{AssociationRule, RuleConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
