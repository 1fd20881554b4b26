//! Column signature hashing
//!
//! A table's signature is the ordered list of `name:type` strings joined
//! with `|`; the fingerprint hash is its SHA-256 hex digest. Column order
//! is part of the signature.

use crate::table::{Table, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Inferred column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    String,
    Null,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
            ColumnType::Null => "null",
        }
    }
}

/// Type of a column from its non-null cells: all integers is `integer`,
/// any mix of integers and floats is `float`, all booleans is `boolean`,
/// anything else `string`, and no non-null cells at all `null`.
pub fn infer_column_type(table: &Table, column: &str) -> ColumnType {
    let mut seen = None;
    for value in table.column_values(column) {
        let current = match value {
            Value::Null => continue,
            Value::Integer(_) => ColumnType::Integer,
            Value::Float(_) => ColumnType::Float,
            Value::Boolean(_) => ColumnType::Boolean,
            Value::String(_) => return ColumnType::String,
        };
        seen = Some(match (seen, current) {
            (None, t) => t,
            (Some(a), b) if a == b => a,
            (Some(ColumnType::Integer), ColumnType::Float) | (Some(ColumnType::Float), ColumnType::Integer) => {
                ColumnType::Float
            }
            _ => return ColumnType::String,
        });
    }
    seen.unwrap_or(ColumnType::Null)
}

/// Fingerprint of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFingerprint {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<ColumnType>,
    /// Absent for tables without rows
    #[serde(default)]
    pub hash: Option<String>,
}

/// Fingerprints keyed by table name, in table order
pub type SchemaFingerprint = IndexMap<String, TableFingerprint>;

/// SHA-256 hex digest of the `name:type` signature
pub fn signature_hash<'a, I>(columns: I) -> String
where
    I: IntoIterator<Item = (&'a str, ColumnType)>,
{
    let signature: Vec<String> = columns
        .into_iter()
        .map(|(name, ty)| format!("{}:{}", name, ty.as_str()))
        .collect();
    let mut hasher = Sha256::new();
    hasher.update(signature.join("|").as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn fingerprint_table(table: &Table) -> TableFingerprint {
    let columns: Vec<String> = table.columns().to_vec();
    let types: Vec<ColumnType> = columns.iter().map(|c| infer_column_type(table, c)).collect();
    let hash = if table.is_empty() {
        None
    } else {
        Some(signature_hash(columns.iter().map(String::as_str).zip(types.iter().copied())))
    };
    TableFingerprint { columns, types, hash }
}

/// Fingerprint each `(name, table)` pair, keeping the given order.
pub fn fingerprint_tables<'a, I>(tables: I) -> SchemaFingerprint
where
    I: IntoIterator<Item = (&'a str, &'a Table)>,
{
    tables
        .into_iter()
        .map(|(name, t)| (name.to_string(), fingerprint_table(t)))
        .collect()
}
