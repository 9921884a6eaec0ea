use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::scholarships::models::{
    CellValue, Dataset, ScholarshipRecord, GPA_COLUMN, MAJOR_COLUMN,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' is missing from the header")]
    MissingColumn(&'static str),
}

/// Inferred type of a passthrough column.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Startup entry point: loads the dataset, or falls back to an empty one.
///
/// A missing or malformed file is logged and never aborts the process; every
/// query against the empty dataset then reports the data as unavailable.
pub fn load_or_empty(path: &Path) -> Dataset {
    match load_dataset(path) {
        Ok(dataset) => {
            let missing_gpa = dataset.records.iter().filter(|r| r.gpa.is_none()).count();
            info!(
                "Loaded {} scholarship records from {:?} ({} with missing GPA)",
                dataset.len(),
                path,
                missing_gpa
            );
            dataset
        }
        Err(e) => {
            warn!("Scholarship dataset unavailable, serving empty dataset: {e}");
            Dataset::empty()
        }
    }
}

pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(file)
}

/// Parses a header-first CSV into a [`Dataset`].
///
/// Ragged rows are tolerated: short rows are padded with nulls and surplus
/// cells are dropped. GPA cells that are not finite numbers become the
/// missing sentinel instead of failing the load.
pub fn parse_dataset<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = dedupe_headers(csv_reader.headers()?.iter().map(str::to_string));
    let gpa_idx = column_index(&headers, GPA_COLUMN)?;
    let major_idx = column_index(&headers, MAJOR_COLUMN)?;

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let row = (0..headers.len())
            .map(|i| record.get(i).filter(|cell| !cell.is_empty()).map(str::to_string))
            .collect();
        rows.push(row);
    }

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|i| match i {
            _ if i == major_idx => ColumnKind::Text,
            _ if i == gpa_idx => ColumnKind::Float,
            _ => infer_kind(rows.iter().filter_map(|row| row[i].as_deref())),
        })
        .collect();

    let records = rows
        .into_iter()
        .map(|row| {
            let gpa = row[gpa_idx].as_deref().and_then(parse_finite);
            let major = row[major_idx].clone().unwrap_or_default();
            let fields = headers
                .iter()
                .zip(row)
                .enumerate()
                .map(|(i, (column, cell))| {
                    let value = match (i, cell) {
                        (i, _) if i == gpa_idx => gpa.map_or(CellValue::Null, CellValue::Float),
                        (i, _) if i == major_idx => CellValue::Text(major.clone()),
                        (_, None) => CellValue::Null,
                        (_, Some(raw)) => typed_cell(kinds[i], raw),
                    };
                    (column.clone(), value)
                })
                .collect();
            ScholarshipRecord::new(gpa, major, fields)
        })
        .collect();

    Ok(Dataset::new(headers, records))
}

/// Renames repeated header names to `<name>.<n>` so every column serializes
/// under a distinct key. The first occurrence keeps its name.
fn dedupe_headers(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    raw.map(|name| {
        let mut candidate = name.clone();
        if seen.contains(&candidate) {
            let n = counts.entry(name.clone()).or_insert(1);
            loop {
                candidate = format!("{name}.{n}");
                *n += 1;
                if !seen.contains(&candidate) {
                    break;
                }
            }
        }
        seen.insert(candidate.clone());
        candidate
    })
    .collect()
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(LoadError::MissingColumn(name))
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A column is integer if every non-empty cell is an integer, float if every
/// non-empty cell is a finite number, and text otherwise.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    for cell in cells {
        if kind == ColumnKind::Integer && cell.trim().parse::<i64>().is_ok() {
            continue;
        }
        if parse_finite(cell).is_some() {
            kind = ColumnKind::Float;
        } else {
            return ColumnKind::Text;
        }
    }
    kind
}

fn typed_cell(kind: ColumnKind, raw: String) -> CellValue {
    match kind {
        ColumnKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map_or(CellValue::Text(raw.clone()), CellValue::Integer),
        ColumnKind::Float => parse_finite(&raw).map_or(CellValue::Text(raw), CellValue::Float),
        ColumnKind::Text => CellValue::Text(raw),
    }
}
