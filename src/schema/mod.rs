//! Schema fingerprinting and drift detection

pub mod drift;
pub mod fingerprint;

pub use drift::{detect_drift, previous_fingerprint, DriftDetail, DriftReport};
pub use fingerprint::{
    fingerprint_table, fingerprint_tables, infer_column_type, signature_hash, ColumnType,
    SchemaFingerprint, TableFingerprint,
};
