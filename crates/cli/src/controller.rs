//! Application controller: the session state behind the load / extract /
//! copy / copy-full / clear actions.

use crate::platform::{Clipboard, ClipboardError, FileSource};
use std::path::{Path, PathBuf};
use stockclip_sheet::{extract, parse_bytes, render_preview, Dataset, FileFormat, SheetError};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const COPY_SUCCESS: &str = "Content copied to clipboard successfully!";
pub const COPY_FULL_SUCCESS: &str = "Full file content copied to clipboard successfully!";

/// User-facing failures of a single action
///
/// None of these leave the controller in a different state than before the
/// action ran.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not read {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Please select a file first")]
    NoFileSelected,

    #[error("The following required columns are missing from the file:\n{}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No data to copy. Please load a file first.")]
    NoData,

    #[error("Could not copy to clipboard: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("{0}")]
    Sheet(SheetError),
}

/// What a load action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was parsed and is now the raw dataset
    Loaded { rows: usize, columns: usize },
    /// Not a `.csv`, `.xlsx` or `.xls` file; nothing changed
    Ignored,
}

/// Owns the raw and extracted datasets plus the visible UI state.
pub struct App<F, C> {
    files: F,
    clipboard: C,
    raw: Option<Dataset>,
    extracted: Option<Dataset>,
    selected_file: Option<PathBuf>,
    copy_enabled: bool,
    status: String,
    preview: String,
}

impl<F: FileSource, C: Clipboard> App<F, C> {
    /// Create a controller with nothing loaded
    pub fn new(files: F, clipboard: C) -> Self {
        App {
            files,
            clipboard,
            raw: None,
            extracted: None,
            selected_file: None,
            copy_enabled: false,
            status: String::new(),
            preview: String::new(),
        }
    }

    /// Load a file, replacing any previously loaded data.
    ///
    /// A file with an unsupported extension is ignored. If the file cannot be
    /// read or parsed, the previously loaded datasets are kept as they were.
    pub async fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadOutcome, AppError> {
        let path = path.as_ref();
        self.selected_file = Some(path.to_path_buf());

        let Some(format) = FileFormat::from_path(path) else {
            debug!(path = %path.display(), "ignoring unsupported file type");
            return Ok(LoadOutcome::Ignored);
        };

        let parse_error = |reason: String| AppError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = self
            .files
            .read_file(path)
            .await
            .map_err(|e| parse_error(e.to_string()))?;
        let dataset = parse_bytes(&bytes, format).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to parse file");
            parse_error(e.to_string())
        })?;

        let outcome = LoadOutcome::Loaded {
            rows: dataset.len(),
            columns: dataset.columns().len(),
        };
        info!(path = %path.display(), ?format, ?outcome, "loaded file");

        self.render(&dataset);
        self.raw = Some(dataset);
        self.extracted = None;
        self.copy_enabled = false;
        Ok(outcome)
    }

    /// Map the loaded data onto the import layout and preview the result.
    ///
    /// Returns the number of extracted rows.
    pub fn extract(&mut self) -> Result<usize, AppError> {
        let raw = self.raw.as_ref().ok_or(AppError::NoFileSelected)?;

        let extracted = extract(raw).map_err(|e| {
            warn!(error = %e, "extraction failed");
            sheet_error(e)
        })?;

        let rows = extracted.len();
        info!(rows, "extracted columns");
        self.render(&extracted);
        self.extracted = Some(extracted);
        self.copy_enabled = true;
        Ok(rows)
    }

    /// Copy the extracted data, or the raw data if nothing was extracted.
    pub async fn copy(&mut self) -> Result<(), AppError> {
        let dataset = self
            .extracted
            .as_ref()
            .or(self.raw.as_ref())
            .ok_or(AppError::NoData)?;
        let text = tsv(dataset)?;

        self.write_clipboard(&text).await?;
        self.status = COPY_SUCCESS.to_string();
        Ok(())
    }

    /// Copy the raw data, ignoring any extraction.
    pub async fn copy_full(&mut self) -> Result<(), AppError> {
        let dataset = self.raw.as_ref().ok_or(AppError::NoData)?;
        let text = tsv(dataset)?;

        self.write_clipboard(&text).await?;
        self.status = COPY_FULL_SUCCESS.to_string();
        Ok(())
    }

    /// Forget all loaded data and reset the visible state.
    pub fn clear(&mut self) {
        info!("cleared session");
        self.raw = None;
        self.extracted = None;
        self.selected_file = None;
        self.copy_enabled = false;
        self.status.clear();
        self.preview.clear();
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), AppError> {
        self.clipboard.write_text(text).await.map_err(|e| {
            warn!(error = %e, "clipboard write failed");
            AppError::Clipboard(e)
        })
    }

    fn render(&mut self, dataset: &Dataset) {
        self.preview = render_preview(dataset).unwrap_or_else(|e| {
            warn!(error = %e, "failed to render preview");
            String::new()
        });
    }

    pub fn raw(&self) -> Option<&Dataset> {
        self.raw.as_ref()
    }

    pub fn extracted(&self) -> Option<&Dataset> {
        self.extracted.as_ref()
    }

    /// The file most recently picked, if any
    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    /// Whether "copy extracted" is available (set by a successful extract)
    pub fn is_copy_enabled(&self) -> bool {
        self.copy_enabled
    }

    /// Last success message, empty after a clear
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The rendered preview table, empty when nothing is shown
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

fn tsv(dataset: &Dataset) -> Result<String, AppError> {
    dataset.to_tsv_string().map_err(sheet_error)
}

fn sheet_error(error: SheetError) -> AppError {
    match error {
        SheetError::MissingColumns(columns) => AppError::MissingColumns(columns),
        SheetError::EmptyData => AppError::NoData,
        other => AppError::Sheet(other),
    }
}
