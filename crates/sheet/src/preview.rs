use crate::dataset::Dataset;
use crate::error::Result;
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use std::sync::Arc;

/// Number of rows shown in a preview
pub const PREVIEW_ROWS: usize = 5;

/// Render the first [`PREVIEW_ROWS`] records as a boxed text table.
///
/// Headers come from the first record. An empty dataset renders as an empty
/// string, which clears any previous preview.
///
/// ```
/// use stockclip_sheet::{render_preview, Dataset};
///
/// let dataset = Dataset::from_csv_str("Barcode,SRP\n1,2.50").unwrap();
/// let table = render_preview(&dataset).unwrap();
/// assert!(table.contains("Barcode"));
/// assert!(table.contains("2.50"));
/// ```
pub fn render_preview(dataset: &Dataset) -> Result<String> {
    let columns = dataset.columns();
    if columns.is_empty() {
        return Ok(String::new());
    }

    let rows = dataset.head(PREVIEW_ROWS);
    let fields: Vec<Field> = columns
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|name| {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|record| {
                    record
                        .get(*name)
                        .filter(|cell| !cell.is_null())
                        .map(|cell| cell.as_str())
                })
                .collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}
