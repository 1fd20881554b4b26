//! Pipeline configuration
//!
//! Loaded from YAML. Every section has defaults, so an empty file is a
//! valid configuration; CLI flags override individual values afterwards.

use crate::analytics::FacilityConfig;
use crate::table::{ColumnSynonyms, TableKind, TableSource};
use pickwave_mining::RuleConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Location of each input table, as a path or URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub picking: Option<String>,
    pub product: Option<String>,
    pub storage: Option<String>,
    pub support: Option<String>,
}

impl SourcesConfig {
    pub fn location(&self, kind: TableKind) -> Option<&str> {
        match kind {
            TableKind::PickingWave => self.picking.as_deref(),
            TableKind::Product => self.product.as_deref(),
            TableKind::Storage => self.storage.as_deref(),
            TableKind::Support => self.support.as_deref(),
        }
    }

    pub fn source(&self, kind: TableKind) -> Option<TableSource> {
        self.location(kind).map(TableSource::parse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("pickwave_report.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Zero-fill nulls in numeric columns after loading
    pub fill_numeric_nulls: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            fill_numeric_nulls: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlottingConfig {
    pub top_n: usize,
}

impl Default for SlottingConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelocationConfig {
    pub top_skus: usize,
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self { top_skus: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    /// Previous document; defaults to the output path
    pub previous: Option<String>,
    pub columns: ColumnSynonyms,
    pub cleaning: CleaningConfig,
    pub facility: FacilityConfig,
    pub slotting: SlottingConfig,
    pub mining: RuleConfig,
    pub relocation: RelocationConfig,
    pub fetch: FetchConfig,
}

impl PipelineConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Where the previous run's document is read from
    pub fn previous_location(&self) -> String {
        self.previous
            .clone()
            .unwrap_or_else(|| self.output.path.display().to_string())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.facility.max_candidates == 0 {
            return Err(ConfigError::Invalid {
                field: "facility.max_candidates".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.facility.min_coverage.is_finite() {
            return Err(ConfigError::Invalid {
                field: "facility.min_coverage".to_string(),
                reason: "must be finite".to_string(),
            });
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "fetch.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{CostModel, SolverKind};

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = PipelineConfig::from_yaml_str("").unwrap();
        assert_eq!(config.slotting.top_n, 5);
        assert_eq!(config.relocation.top_skus, 10);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.mining.max_rules, 50);
        assert!(config.cleaning.fill_numeric_nulls);
        assert_eq!(config.previous_location(), "pickwave_report.json");
    }

    #[test]
    fn test_partial_sections() {
        let yaml = r#"
sources:
  picking: data/picking.csv
  storage: https://example.com/storage.csv
output:
  path: out/report.json
facility:
  cost: !column Distance
  seed: 7
  solver: enumeration
mining:
  min_lift: 1.5
columns:
  sku: [ItemCode]
"#;
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.sources.location(TableKind::PickingWave), Some("data/picking.csv"));
        assert_eq!(
            config.sources.source(TableKind::Storage),
            Some(TableSource::Url("https://example.com/storage.csv".to_string()))
        );
        assert_eq!(config.sources.source(TableKind::Product), None);
        assert_eq!(config.facility.cost, CostModel::Column("Distance".to_string()));
        assert_eq!(config.facility.seed, Some(7));
        assert_eq!(config.facility.solver, SolverKind::Enumeration);
        assert_eq!(config.facility.max_candidates, 10);
        assert_eq!(config.mining.min_lift, 1.5);
        assert_eq!(config.mining.min_pair_count, 5);
        assert_eq!(config.columns.sku, vec!["ItemCode"]);
        assert_eq!(config.columns.wave[0], "WaveNumber");
        assert_eq!(config.previous_location(), "out/report.json");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PipelineConfig::from_yaml_str("facility:\n  max_candidates: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        assert!(matches!(
            PipelineConfig::from_yaml_str("slotting: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
