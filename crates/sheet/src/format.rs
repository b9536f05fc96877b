use crate::csv::CsvOptions;
use crate::dataset::Dataset;
use crate::error::Result;
use std::path::Path;

/// Input formats recognised by file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated text (`.csv`)
    Csv,
    /// Excel workbook (`.xlsx` or `.xls`)
    Workbook,
}

impl FileFormat {
    /// Detect the format from a file name's extension.
    ///
    /// Returns `None` for anything that is not `.csv`, `.xlsx` or `.xls`;
    /// callers treat that as "nothing to load". Matching is case-sensitive.
    ///
    /// ```
    /// use stockclip_sheet::FileFormat;
    ///
    /// assert_eq!(FileFormat::from_path("stock.csv"), Some(FileFormat::Csv));
    /// assert_eq!(FileFormat::from_path("stock.xls"), Some(FileFormat::Workbook));
    /// assert_eq!(FileFormat::from_path("stock.txt"), None);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_str()?;
        if name.ends_with(".csv") {
            Some(FileFormat::Csv)
        } else if name.ends_with(".xlsx") || name.ends_with(".xls") {
            Some(FileFormat::Workbook)
        } else {
            None
        }
    }
}

/// Parse raw file content according to its format
pub fn parse_bytes(bytes: &[u8], format: FileFormat) -> Result<Dataset> {
    match format {
        FileFormat::Csv => Dataset::from_csv_bytes(bytes, &CsvOptions::default()),
        FileFormat::Workbook => Dataset::from_workbook_bytes(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;

    #[test]
    fn test_detection() {
        assert_eq!(FileFormat::from_path("/tmp/a.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_path("a.xlsx"), Some(FileFormat::Workbook));
        assert_eq!(FileFormat::from_path("a.CSV"), None);
        assert_eq!(FileFormat::from_path("a.xlsb"), None);
        assert_eq!(FileFormat::from_path("csv"), None);
        assert_eq!(FileFormat::from_path(""), None);
    }

    #[test]
    fn test_parse_bytes_dispatch() {
        let dataset = parse_bytes(b"a,b\n1,2", FileFormat::Csv).unwrap();
        assert_eq!(dataset.len(), 1);

        let err = parse_bytes(b"a,b\n1,2", FileFormat::Workbook).unwrap_err();
        assert!(matches!(err, SheetError::Parse(_)));
    }
}
