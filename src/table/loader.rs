//! Table loading from local CSV files or HTTP(S) URLs

use super::frame::{Table, TableError, TableResult};
use super::value::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Where a table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Path(PathBuf),
    Url(String),
}

impl TableSource {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            TableSource::Url(location.to_string())
        } else {
            TableSource::Path(PathBuf::from(location))
        }
    }

    /// Google Drive share links (`...?id=<file>`) are rewritten to their
    /// direct-download form; other locations pass through.
    pub fn download_url(&self) -> Option<String> {
        match self {
            TableSource::Url(url) if url.contains("drive.google.com") && url.contains("id=") => {
                let file_id = url.rsplit("id=").next().unwrap_or_default();
                let file_id = file_id.split('&').next().unwrap_or_default();
                Some(format!("https://drive.google.com/uc?export=download&id={}", file_id))
            }
            TableSource::Url(url) => Some(url.clone()),
            TableSource::Path(_) => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TableSource::Path(p) => p.display().to_string(),
            TableSource::Url(u) => u.clone(),
        }
    }
}

/// Parse CSV text with a header row.
///
/// Repeated header names get a `.1`, `.2`, ... suffix so every column stays
/// addressable. Short records are padded with nulls; records wider than
/// the header are skipped.
pub fn parse_csv<R: Read>(name: &str, reader: R) -> TableResult<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut columns: Vec<String> = Vec::new();
    for header in csv_reader.headers()?.iter() {
        let header = header.trim_start_matches('\u{feff}').to_string();
        let mut candidate = header.clone();
        let mut suffix = 1;
        while columns.contains(&candidate) {
            candidate = format!("{}.{}", header, suffix);
            suffix += 1;
        }
        columns.push(candidate);
    }

    let width = columns.len();
    let mut table = Table::new(name, columns);
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.len() > width {
            warn!(
                "Skipping record {} of {}: {} fields for {} columns",
                line + 1,
                name,
                record.len(),
                width
            );
            continue;
        }
        let mut values: Vec<Value> = record.iter().map(Value::parse).collect();
        values.resize(width, Value::Null);
        table.push_row(values)?;
    }

    debug!("Parsed {} rows x {} columns for {}", table.len(), table.columns().len(), name);
    Ok(table)
}

/// Load one table from its source.
pub async fn load_table(name: &str, source: &TableSource, client: &reqwest::Client) -> TableResult<Table> {
    let bytes = match source {
        TableSource::Path(path) => tokio::fs::read(path).await?,
        TableSource::Url(_) => {
            let url = source.download_url().unwrap_or_default();
            info!("Downloading {} from {}", name, url);
            let response = client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(TableError::HttpStatus {
                    url,
                    status: status.as_u16(),
                });
            }
            response.bytes().await?.to_vec()
        }
    };
    parse_csv(name, bytes.as_slice())
}
