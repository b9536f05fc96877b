//! Column extraction: validate the stock-list columns and rename/reorder them
//! into the import layout.

use crate::cell::CellValue;
use crate::dataset::{Dataset, Record};
use crate::error::{Result, SheetError};
use tracing::debug;

/// Columns that must be present for extraction to succeed, in report order
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Barcode",
    "Spec Stock Number",
    "Description",
    "Quantity",
    "SRP",
];

/// Columns that are copied when present and default to empty text otherwise
pub const OPTIONAL_COLUMNS: [&str; 2] = ["SuppCode", "Batchdate"];

/// Input column name to output column name
pub const COLUMN_MAPPING: [(&str, &str); 7] = [
    ("Barcode", "12-DigitBarcode"),
    ("Spec Stock Number", "StockNo"),
    ("Description", "Item Description"),
    ("Quantity", "Quantity"),
    ("SRP", "Price"),
    ("SuppCode", "SuppCode"),
    ("Batchdate", "Batchdate"),
];

/// Input columns in the order they appear in the output
pub const OUTPUT_ORDER: [&str; 7] = [
    "Barcode",
    "Spec Stock Number",
    "Description",
    "SuppCode",
    "Batchdate",
    "Quantity",
    "SRP",
];

/// Output name for an input column, if it is part of the mapping
#[must_use]
pub fn output_name(input: &str) -> Option<&'static str> {
    COLUMN_MAPPING
        .iter()
        .find(|(from, _)| *from == input)
        .map(|(_, to)| *to)
}

/// The seven output column names, in output order
#[must_use]
pub fn output_columns() -> Vec<&'static str> {
    OUTPUT_ORDER.iter().filter_map(|col| output_name(col)).collect()
}

/// Required columns absent from the dataset's schema, in required order.
///
/// The schema comes from the first record, so an empty dataset is missing all
/// of them.
#[must_use]
pub fn missing_columns(dataset: &Dataset) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !dataset.has_column(col))
        .collect()
}

fn extract_record(row: &Record) -> Record {
    OUTPUT_ORDER
        .iter()
        .filter_map(|col| {
            let name = output_name(col)?;
            let source = row.get(*col);
            let value = if OPTIONAL_COLUMNS.contains(col) {
                match source {
                    Some(cell) if !cell.is_falsy() => cell.clone(),
                    _ => CellValue::String(String::new()),
                }
            } else {
                source.cloned().unwrap_or_default()
            };
            Some((name.to_string(), value))
        })
        .collect()
}

/// Map a dataset onto the fixed output schema.
///
/// Every output record has exactly the seven output columns in output order,
/// whatever extra columns the input carried. Required cells pass through
/// unchanged (`Null` stays `Null`); `SuppCode` and `Batchdate` become empty
/// text when absent or falsy.
///
/// # Errors
///
/// Returns [`SheetError::MissingColumns`] listing the absent required columns.
///
/// ```
/// use stockclip_sheet::{extract, Dataset};
///
/// let raw = Dataset::from_csv_str(
///     "Barcode,Spec Stock Number,Description,Quantity,SRP\n123456789012,SN1,Widget,10,9.99",
/// )
/// .unwrap();
/// let out = extract(&raw).unwrap();
/// assert_eq!(
///     out.columns(),
///     vec!["12-DigitBarcode", "StockNo", "Item Description", "SuppCode", "Batchdate", "Quantity", "Price"]
/// );
/// ```
pub fn extract(dataset: &Dataset) -> Result<Dataset> {
    let missing = missing_columns(dataset);
    if !missing.is_empty() {
        debug!(?missing, "required columns missing");
        return Err(SheetError::MissingColumns(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }

    let records: Vec<Record> = dataset.iter().map(extract_record).collect();
    debug!(rows = records.len(), "extracted columns");
    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Barcode,Spec Stock Number,Description,Quantity,SRP";

    #[test]
    fn test_output_columns() {
        assert_eq!(
            output_columns(),
            vec![
                "12-DigitBarcode",
                "StockNo",
                "Item Description",
                "SuppCode",
                "Batchdate",
                "Quantity",
                "Price"
            ]
        );
        assert_eq!(output_name("SRP"), Some("Price"));
        assert_eq!(output_name("Colour"), None);
    }

    #[test]
    fn test_missing_columns_in_required_order() {
        let dataset = Dataset::from_csv_str("SRP,Description,Extra\n1,2,3").unwrap();
        assert_eq!(
            missing_columns(&dataset),
            vec!["Barcode", "Spec Stock Number", "Quantity"]
        );
    }

    #[test]
    fn test_empty_dataset_misses_everything() {
        let err = extract(&Dataset::new()).unwrap_err();
        assert_eq!(
            err.missing_columns().unwrap(),
            REQUIRED_COLUMNS.map(String::from).as_slice()
        );
    }

    #[test]
    fn test_optional_columns_default_to_empty() {
        let csv = format!("{HEADER},SuppCode,Batchdate\n1,SN,W,2,3.5,,B7\n4,SN2,V,5,6");
        let out = extract(&Dataset::from_csv_str(&csv).unwrap()).unwrap();

        assert_eq!(out.records()[0]["SuppCode"], CellValue::from(""));
        assert_eq!(out.records()[0]["Batchdate"], CellValue::from("B7"));
        // short line: optional cells are Null in the source
        assert_eq!(out.records()[1]["SuppCode"], CellValue::from(""));
        assert_eq!(out.records()[1]["Batchdate"], CellValue::from(""));
    }

    #[test]
    fn test_falsy_optional_numbers_become_empty() {
        let mut row = Record::new();
        for col in REQUIRED_COLUMNS {
            row.insert(col.to_string(), CellValue::from("x"));
        }
        row.insert("SuppCode".to_string(), CellValue::Int(0));
        row.insert("Batchdate".to_string(), CellValue::Float(45_000.0));

        let out = extract(&Dataset::from_records(vec![row])).unwrap();
        assert_eq!(out.records()[0]["SuppCode"], CellValue::from(""));
        assert_eq!(out.records()[0]["Batchdate"], CellValue::Float(45_000.0));
    }

    #[test]
    fn test_required_null_passes_through() {
        let csv = format!("{HEADER}\n1,SN,W");
        let out = extract(&Dataset::from_csv_str(&csv).unwrap()).unwrap();
        assert_eq!(out.records()[0]["Quantity"], CellValue::Null);
        assert_eq!(out.records()[0]["Price"], CellValue::Null);
    }

    #[test]
    fn test_row_order_and_count_preserved() {
        let csv = format!("Extra,{HEADER}\nz,1,a,d,1,1\ny,2,b,e,2,2\nx,3,c,f,3,3");
        let raw = Dataset::from_csv_str(&csv).unwrap();
        let out = extract(&raw).unwrap();

        assert_eq!(out.len(), raw.len());
        let barcodes: Vec<_> = out
            .iter()
            .map(|r| r["12-DigitBarcode"].as_str())
            .collect();
        assert_eq!(barcodes, vec!["1", "2", "3"]);
        assert!(out.iter().all(|r| r.len() == 7 && !r.contains_key("Extra")));
    }
}
