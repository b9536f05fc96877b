//! Tabular data pipeline for stockclip
//!
//! Loads a stock list from CSV or Excel into ordered row records, maps the
//! required columns onto the fixed import layout, and exports records as
//! tab-separated text ready for pasting.
//!
//! # Examples
//!
//! ## Loading and extracting
//!
//! ```
//! use stockclip_sheet::{extract, Dataset};
//!
//! let raw = Dataset::from_csv_str(
//!     "Barcode,Spec Stock Number,Description,Quantity,SRP\n123456789012,SN1,Widget,10,9.99\n",
//! )
//! .unwrap();
//! assert_eq!(raw.len(), 1);
//!
//! let extracted = extract(&raw).unwrap();
//! assert_eq!(
//!     extracted.to_tsv_string().unwrap(),
//!     "12-DigitBarcode\tStockNo\tItem Description\tSuppCode\tBatchdate\tQuantity\tPrice\n\
//!      123456789012\tSN1\tWidget\t\t\t10\t9.99"
//! );
//! ```
//!
//! ## Dispatching on the file name
//!
//! ```no_run
//! use stockclip_sheet::{parse_bytes, FileFormat};
//!
//! let path = "stock.xlsx";
//! if let Some(format) = FileFormat::from_path(path) {
//!     let bytes = std::fs::read(path).unwrap();
//!     let dataset = parse_bytes(&bytes, format).unwrap();
//!     println!("{} rows", dataset.len());
//! }
//! ```

mod cell;
mod csv;
mod dataset;
mod error;
pub mod extract;
mod format;
mod preview;
mod tsv;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use crate::csv::CsvOptions;
/// Re-export dataset types.
pub use dataset::{Dataset, Record};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export the column extractor.
pub use extract::{extract, missing_columns};
/// Re-export format detection.
pub use format::{parse_bytes, FileFormat};
/// Re-export the preview renderer.
pub use preview::{render_preview, PREVIEW_ROWS};
