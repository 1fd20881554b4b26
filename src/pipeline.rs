//! Daily batch pipeline
//!
//! Loads the four extracts, runs every analytics stage in sequence and
//! assembles the report. Stage failures degrade to empty output and are
//! recorded in `stage_status`; only writing the report can fail the run.

use crate::analytics::{
    aggregate_slotting, mine_copick_rules, select_facilities, suggest_relocations, summarize,
    validate, ValidationFlags,
};
use crate::config::PipelineConfig;
use crate::prior::{source_for, PriorDocumentSource};
use crate::report::{write_report, MetaInfo, Report, ReportError, SummaryBlock, STATUS_DEGRADED, STATUS_SUCCESS};
use crate::schema::{detect_drift, fingerprint_tables, previous_fingerprint, SchemaFingerprint};
use crate::scoring::{score_automation, ScoreInputs};
use crate::stage::{StageError, StageResult, StageStatus};
use crate::table::{count_nulls, fill_numeric_nulls, load_table, Table, TableKind};
use indexmap::IndexMap;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// The four input tables
#[derive(Debug, Clone)]
pub struct Datasets {
    pub picking: Table,
    pub product: Table,
    pub storage: Table,
    pub support: Table,
}

impl Datasets {
    pub fn empty() -> Self {
        Self {
            picking: Table::empty(TableKind::PickingWave.as_str()),
            product: Table::empty(TableKind::Product.as_str()),
            storage: Table::empty(TableKind::Storage.as_str()),
            support: Table::empty(TableKind::Support.as_str()),
        }
    }

    pub fn get(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::PickingWave => &self.picking,
            TableKind::Product => &self.product,
            TableKind::Storage => &self.storage,
            TableKind::Support => &self.support,
        }
    }

    fn get_mut(&mut self, kind: TableKind) -> &mut Table {
        match kind {
            TableKind::PickingWave => &mut self.picking,
            TableKind::Product => &mut self.product,
            TableKind::Storage => &mut self.storage,
            TableKind::Support => &mut self.support,
        }
    }

    /// Tables in report order
    pub fn tables(&self) -> [(TableKind, &Table); 4] {
        TableKind::ALL.map(|kind| (kind, self.get(kind)))
    }

    pub fn all_non_empty(&self) -> bool {
        self.tables().iter().all(|(_, t)| !t.is_empty())
    }
}

/// Loaded tables plus what was observed while loading
#[derive(Debug, Clone)]
pub struct Inputs {
    pub datasets: Datasets,
    /// Null cells per table before cleaning
    pub null_counts: IndexMap<String, usize>,
    pub data_sources: IndexMap<String, String>,
}

impl Inputs {
    /// Wrap in-memory tables. Nulls are counted as given.
    pub fn new(datasets: Datasets) -> Self {
        let null_counts = datasets
            .tables()
            .iter()
            .map(|(kind, table)| (kind.as_str().to_string(), count_nulls(table)))
            .collect();
        Self {
            datasets,
            null_counts,
            data_sources: IndexMap::new(),
        }
    }
}

/// Previous run's document, if it could be read
#[derive(Debug, Clone, PartialEq)]
pub enum PriorState {
    Reachable(JsonValue),
    Unreachable(String),
}

impl PriorState {
    pub async fn fetch(source: &dyn PriorDocumentSource) -> Self {
        match source.fetch().await {
            Ok(document) => {
                debug!("Loaded previous document from {}", source.describe());
                PriorState::Reachable(document)
            }
            Err(e) => {
                warn!("Previous document {} unreachable: {}", source.describe(), e);
                PriorState::Unreachable(e.to_string())
            }
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, PriorState::Reachable(_))
    }

    pub fn fingerprint(&self) -> StageResult<SchemaFingerprint> {
        match self {
            PriorState::Reachable(document) => Ok(previous_fingerprint(document)),
            PriorState::Unreachable(reason) => Err(StageError::UnreachablePriorState(reason.clone())),
        }
    }
}

/// Runs stages in order and keeps their statuses
struct StageLog {
    statuses: Vec<StageStatus>,
}

impl StageLog {
    fn new() -> Self {
        Self { statuses: Vec::new() }
    }

    fn record<T>(&mut self, stage: &str, result: StageResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.statuses.push(StageStatus::ok(stage));
                Some(value)
            }
            Err(e) => {
                warn!("Stage {} degraded: {}", stage, e);
                self.statuses.push(StageStatus::degraded(stage, &e));
                None
            }
        }
    }

    fn all_ok(&self) -> bool {
        self.statuses.iter().all(|s| s.ok)
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    client: Client,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load every configured table. A table that cannot be loaded, or has
    /// no configured source, is empty.
    pub async fn load_datasets(&self) -> Inputs {
        let mut datasets = Datasets::empty();
        let mut null_counts = IndexMap::new();
        let mut data_sources = IndexMap::new();

        for kind in TableKind::ALL {
            let name = kind.as_str();
            let Some(source) = self.config.sources.source(kind) else {
                debug!("No source configured for {}", name);
                null_counts.insert(name.to_string(), 0);
                continue;
            };
            data_sources.insert(name.to_string(), source.describe());

            let mut table = match load_table(name, &source, &self.client).await {
                Ok(table) => {
                    info!("Loaded {} with {} rows", name, table.len());
                    table
                }
                Err(e) => {
                    warn!("Failed to load {} from {}: {}", name, source.describe(), e);
                    Table::empty(name)
                }
            };

            null_counts.insert(name.to_string(), count_nulls(&table));
            if self.config.cleaning.fill_numeric_nulls {
                let filled = fill_numeric_nulls(&mut table);
                if filled > 0 {
                    debug!("Filled {} numeric nulls in {}", filled, name);
                }
            }
            *datasets.get_mut(kind) = table;
        }

        Inputs {
            datasets,
            null_counts,
            data_sources,
        }
    }

    /// Run every analytics stage and assemble the report.
    pub fn analyze(&self, inputs: &Inputs, prior: &PriorState) -> Report {
        let data = &inputs.datasets;
        let columns = &self.config.columns;
        let mut log = StageLog::new();

        let summary = summarize(&data.picking, &data.storage, &data.support, columns);
        let validation = validate(&data.tables(), &inputs.null_counts);

        let facility = log.record("facility_selection", select_facilities(&data.storage, &self.config.facility));
        let slotting = log
            .record("slotting", aggregate_slotting(&data.product, columns, self.config.slotting.top_n))
            .unwrap_or_default();
        let rules = log
            .record("copick_mining", mine_copick_rules(&data.picking, columns, &self.config.mining))
            .unwrap_or_default();
        let suggestions = log
            .record(
                "slot_relocation",
                suggest_relocations(&data.picking, &data.storage, columns, self.config.relocation.top_skus),
            )
            .unwrap_or_default();

        let fingerprint = fingerprint_tables(data.tables().map(|(kind, t)| (kind.as_str(), t)));
        let previous = log.record("schema_drift", prior.fingerprint());
        let drift = detect_drift(&fingerprint, previous.as_ref());
        if drift.any_changed() {
            warn!("Schema drift detected in {:?}", drift.changed_tables());
        }

        let automation = score_automation(ScoreInputs {
            rule_count: rules.len(),
            suggestion_count: suggestions.len(),
            drift: Some(&drift),
            prior_state_reachable: prior.is_reachable(),
        });

        let score = facility.as_ref().map(|f| f.score);
        let validation_flags = ValidationFlags {
            data_complete: data.all_non_empty(),
            optimization_success: score.is_some(),
            slotting_success: !slotting.is_empty(),
        };
        let status = if log.all_ok() { STATUS_SUCCESS } else { STATUS_DEGRADED };

        info!(
            "Analysis finished: status={} score={} rules={} suggestions={}",
            status,
            automation.score,
            rules.len(),
            suggestions.len()
        );

        Report {
            last_updated_iso: chrono::Utc::now().to_rfc3339(),
            run_id: uuid::Uuid::new_v4().to_string(),
            status: status.to_string(),
            data_summary: SummaryBlock {
                summary,
                optimized_distance_score: score,
                slotting_result_sample: slotting,
            },
            facility_selection: facility,
            copick_rules: rules,
            slot_relocation_suggestions: suggestions,
            schema_fingerprint: fingerprint,
            schema_drift: drift.changed,
            schema_drift_detail: drift.detail,
            automation_intelligence: automation,
            validation,
            validation_flags,
            stage_status: log.statuses,
            meta_info: MetaInfo {
                version: crate::VERSION.to_string(),
                data_sources: inputs.data_sources.clone(),
            },
        }
    }

    /// Load, analyze and write the report, reading the previous document
    /// from the configured location.
    pub async fn run(&self) -> PipelineResult<Report> {
        let location = self.config.previous_location();
        let prior = source_for(Some(&location), &self.client);
        self.run_with_prior(prior.as_ref()).await
    }

    pub async fn run_with_prior(&self, prior: &dyn PriorDocumentSource) -> PipelineResult<Report> {
        let inputs = self.load_datasets().await;
        // Read before writing: the default prior location is the output path.
        let prior = PriorState::fetch(prior).await;
        let report = self.analyze(&inputs, &prior);
        write_report(&report, &self.config.output.path).await?;
        Ok(report)
    }
}
