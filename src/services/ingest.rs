//! Tabular input: Jamabandi CSV exports, with or without leading metadata rows.

use crate::domain::constants::REQUIRED_COLUMNS;
use crate::domain::models::{Field, LandRecord, SkippedRow};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("cannot read {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no header row found")]
    NoHeader,
}

#[derive(Debug)]
pub struct Ingested {
    pub headers: Vec<String>,
    pub records: Vec<LandRecord>,
    pub skipped: Vec<SkippedRow>,
}

fn looks_like_header(row: &csv::StringRecord) -> bool {
    row.iter().any(|cell| {
        let c = cell.to_ascii_lowercase();
        c.contains("khevat") || c.contains("owner")
    })
}

pub fn load_records(path: &Path) -> Result<Ingested, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Open {
        path: path.display().to_string(),
        source,
    })?;
    parse_records(file)
}

/// Reads every row, then picks the header: the first of the leading three rows
/// that mentions `Khevat` or `Owner`, else the third row (two metadata lines
/// such as "Table 1" precede the header in the legacy export format).
///
/// Unreadable rows are skipped and reported, never dropped silently.
pub fn parse_records<R: Read>(reader: R) -> Result<Ingested, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(idx as u64 + 1);
                tracing::warn!(line, error = %e, "skipping unreadable row");
                skipped.push(SkippedRow {
                    line,
                    error: e.to_string(),
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(IngestError::NoHeader);
    }
    let header_pos = rows
        .iter()
        .take(3)
        .position(looks_like_header)
        .unwrap_or(if rows.len() > 2 { 2 } else { 0 });
    tracing::debug!(header_pos, "header row detected");

    let widest = rows[header_pos..]
        .iter()
        .map(|r| r.len())
        .max()
        .unwrap_or(0);
    let raw: Vec<&str> = (0..widest)
        .map(|i| rows[header_pos].get(i).unwrap_or("").trim())
        .collect();
    let headers = unique_headers(&raw);

    let mut records = Vec::new();
    for row in &rows[header_pos + 1..] {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), row.get(i).unwrap_or("").to_string()))
            .collect();
        records.push(LandRecord::from_columns(columns));
    }

    Ok(Ingested {
        headers,
        records,
        skipped,
    })
}

/// Names every column uniquely: blank cells become `Unnamed: i`, repeats of a
/// name get `.1`, `.2`, ... appended, skipping names already taken.
fn unique_headers(raw: &[&str]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (i, cell) in raw.iter().enumerate() {
        let base = if cell.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            cell.to_string()
        };
        let mut name = base.clone();
        while taken.contains(&name) {
            let n = repeats.entry(base.clone()).or_insert(0);
            *n += 1;
            name = format!("{}.{}", base, n);
        }
        taken.insert(name.clone());
        headers.push(name);
    }
    headers
}

/// Required columns with no matching header.
pub fn missing_required_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| {
            let field = Field::from_header(required);
            !headers.iter().any(|h| Field::from_header(h) == field)
        })
        .map(|c| c.to_string())
        .collect()
}
