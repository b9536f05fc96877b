use crate::cell::CellValue;
use indexmap::IndexMap;

/// One data row: column name to cell value, in column order
pub type Record = IndexMap<String, CellValue>;

/// An ordered sequence of row records sharing a column schema
///
/// The schema is whatever the first record's keys are, in that record's
/// insertion order. That order drives preview headers and TSV export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from a list of records
    ///
    /// # Example
    /// ```
    /// use indexmap::IndexMap;
    /// use stockclip_sheet::{CellValue, Dataset};
    ///
    /// let mut row = IndexMap::new();
    /// row.insert("Barcode".to_string(), CellValue::from("123"));
    ///
    /// let dataset = Dataset::from_records(vec![row]);
    /// assert_eq!(dataset.columns(), vec!["Barcode"]);
    /// ```
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in order
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The first record, which defines the schema
    #[must_use]
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Column names taken from the first record (empty for an empty dataset)
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.first()
            .map(|record| record.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether the schema contains a column
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.first().is_some_and(|record| record.contains_key(name))
    }

    /// The first `n` records
    #[must_use]
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Consume the dataset, returning its records
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Cell values of a record in schema order; absent keys read as `Null`
    pub(crate) fn row_values<'a>(
        columns: &'a [&'a str],
        record: &'a Record,
    ) -> impl Iterator<Item = &'a CellValue> + 'a {
        static NULL: CellValue = CellValue::Null;
        columns
            .iter()
            .map(move |name| record.get(*name).unwrap_or(&NULL))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::from_records(records)
    }
}
