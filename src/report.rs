//! Output document
//!
//! The JSON layout consumed downstream. `schema_fingerprint` is read back by
//! the next run for drift detection.

use crate::analytics::{CategoryCount, DataSummary, FacilitySelection, RelocationSuggestion, Validation, ValidationFlags};
use crate::schema::{DriftDetail, SchemaFingerprint};
use crate::scoring::AutomationIntelligence;
use crate::stage::StageStatus;
use indexmap::IndexMap;
use pickwave_mining::AssociationRule;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Report errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Every stage succeeded
pub const STATUS_SUCCESS: &str = "Success";
/// At least one stage fell back to its empty output
pub const STATUS_DEGRADED: &str = "Degraded";

#[derive(Debug, Clone, Serialize)]
pub struct SummaryBlock {
    #[serde(flatten)]
    pub summary: DataSummary,
    pub optimized_distance_score: Option<f64>,
    pub slotting_result_sample: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetaInfo {
    pub version: String,
    /// Table name to path or URL it was loaded from
    pub data_sources: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub last_updated_iso: String,
    pub run_id: String,
    pub status: String,
    pub data_summary: SummaryBlock,
    pub facility_selection: Option<FacilitySelection>,
    pub copick_rules: Vec<AssociationRule>,
    pub slot_relocation_suggestions: Vec<RelocationSuggestion>,
    pub schema_fingerprint: SchemaFingerprint,
    pub schema_drift: IndexMap<String, bool>,
    pub schema_drift_detail: IndexMap<String, DriftDetail>,
    pub automation_intelligence: AutomationIntelligence,
    pub validation: Validation,
    pub validation_flags: ValidationFlags,
    pub stage_status: Vec<StageStatus>,
    pub meta_info: MetaInfo,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn to_json_pretty(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the report as pretty-printed JSON, creating parent directories.
pub async fn write_report(report: &Report, path: impl AsRef<Path>) -> ReportResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let body = report.to_json_pretty()?;
    tokio::fs::write(path, body).await?;
    info!("Wrote report {} to {}", report.run_id, path.display());
    Ok(())
}
