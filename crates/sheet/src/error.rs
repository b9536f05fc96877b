use thiserror::Error;

/// Errors that can occur while loading, extracting or exporting a dataset
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Unable to read file: {0}")]
    Parse(String),

    #[error("The following required columns are missing from the file:\n{}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No data to export")]
    EmptyData,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl SheetError {
    /// Missing column names, if this is a missing-columns failure
    #[must_use]
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            SheetError::MissingColumns(columns) => Some(columns),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
