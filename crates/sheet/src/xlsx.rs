use crate::cell::CellValue;
use crate::dataset::{Dataset, Record};
use crate::error::{Result, SheetError};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

const EMPTY_HEADER: &str = "__EMPTY";

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30; keep the serial number
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

/// Build unique header names from the first row.
///
/// Blank cells become `__EMPTY`; a repeated name gets `_1`, `_2`, ... appended.
fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(row.len());

    for cell in row {
        let base = match cell {
            Data::Empty => EMPTY_HEADER.to_string(),
            other => data_to_cell_value(other).as_str(),
        };

        let name = match seen.get(&base).copied() {
            None => {
                seen.insert(base.clone(), 1);
                base
            }
            Some(mut counter) => {
                let mut candidate = format!("{base}_{counter}");
                counter += 1;
                while seen.contains_key(&candidate) {
                    candidate = format!("{base}_{counter}");
                    counter += 1;
                }
                seen.insert(base, counter);
                seen.insert(candidate.clone(), 1);
                candidate
            }
        };
        names.push(name);
    }

    names
}

fn range_to_dataset(range: &Range<Data>) -> Dataset {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Dataset::new();
    };
    let headers = header_names(header_row);

    let records: Vec<Record> = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    let value = row.get(index).map(data_to_cell_value).unwrap_or_default();
                    (name.clone(), value)
                })
                .collect()
        })
        .collect();

    Dataset::from_records(records)
}

impl Dataset {
    /// Load a dataset from the first sheet of an Excel file (`.xlsx` or `.xls`)
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or is not a workbook.
    pub fn from_workbook<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_workbook_bytes(&bytes)
    }

    /// Load a dataset from the first sheet of in-memory workbook bytes
    ///
    /// The workbook kind is detected from the content. The first row of the
    /// sheet's used range is the header; blank rows are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Parse`] if the bytes cannot be decoded.
    pub fn from_workbook_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| SheetError::Parse(e.to_string()))?;

        let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
            debug!("workbook has no sheets");
            return Ok(Dataset::new());
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| SheetError::Parse(e.to_string()))?;

        let dataset = range_to_dataset(&range);
        debug!(
            sheet = %sheet_name,
            columns = dataset.columns().len(),
            rows = dataset.len(),
            "parsed workbook sheet"
        );

        Ok(dataset)
    }
}
