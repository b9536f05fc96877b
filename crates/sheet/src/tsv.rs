use crate::cell::CellValue;
use crate::dataset::Dataset;
use crate::error::{Result, SheetError};
use std::io::Write;
use tracing::debug;

impl Dataset {
    /// Write the dataset as tab-separated text
    ///
    /// The header line is the first record's keys; each row's values follow
    /// that key order. Fields are written verbatim: embedded tabs and newlines
    /// are not escaped.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<()> {
        if self.is_empty() {
            return Err(SheetError::EmptyData);
        }
        let columns = self.columns();

        let mut tsv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(writer);

        write_row(&mut tsv_writer, &columns)?;
        for record in self {
            let row: Vec<String> = Dataset::row_values(&columns, record)
                .map(CellValue::as_str)
                .collect();
            write_row(&mut tsv_writer, &row)?;
        }

        tsv_writer.flush()?;
        Ok(())
    }

    /// Convert the dataset to a TSV string with no trailing newline
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::EmptyData`] for an empty dataset.
    pub fn to_tsv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_tsv(&mut buffer)?;
        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }

        debug!(rows = self.len(), bytes = buffer.len(), "serialized TSV");
        Ok(String::from_utf8(buffer)?)
    }
}

/// Write one line of fields.
///
/// The csv writer quotes a record made of a single empty field so that it
/// reads back as a record; here that line is written as an empty line.
fn write_row<W, T>(writer: &mut csv::Writer<W>, fields: &[T]) -> Result<()>
where
    W: Write,
    T: AsRef<[u8]>,
{
    if let [field] = fields {
        if field.as_ref().is_empty() {
            writer.flush()?;
            writer.get_mut().write_all(b"\n")?;
            return Ok(());
        }
    }
    writer.write_record(fields)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    #[test]
    fn test_to_tsv_string() {
        let dataset = Dataset::from_csv_str("name,age\nAlice,30\nBob,25").unwrap();
        assert_eq!(
            dataset.to_tsv_string().unwrap(),
            "name\tage\nAlice\t30\nBob\t25"
        );
    }

    #[test]
    fn test_missing_cells_are_blank() {
        let dataset = Dataset::from_csv_str("a,b,c\n1\n,2,").unwrap();
        assert_eq!(dataset.to_tsv_string().unwrap(), "a\tb\tc\n1\t\t\n\t2\t");
    }

    #[test]
    fn test_no_quoting() {
        let dataset = Dataset::from_csv_str("say,q\nhe said \"hi\",it's\tok").unwrap();
        assert_eq!(
            dataset.to_tsv_string().unwrap(),
            "say\tq\nhe said \"hi\"\tit's\tok"
        );
    }

    #[test]
    fn test_header_order_drives_rows() {
        let mut first = Record::new();
        first.insert("x".into(), CellValue::from("1"));
        first.insert("y".into(), CellValue::from("2"));
        let mut second = Record::new();
        second.insert("y".into(), CellValue::from("4"));
        second.insert("x".into(), CellValue::from("3"));

        let dataset = Dataset::from_records(vec![first, second]);
        assert_eq!(dataset.to_tsv_string().unwrap(), "x\ty\n1\t2\n3\t4");
    }

    #[test]
    fn test_typed_cells() {
        let mut row = Record::new();
        row.insert("n".into(), CellValue::Float(9.99));
        row.insert("i".into(), CellValue::Int(12));
        row.insert("b".into(), CellValue::Bool(false));
        row.insert("z".into(), CellValue::Null);

        let dataset = Dataset::from_records(vec![row]);
        assert_eq!(dataset.to_tsv_string().unwrap(), "n\ti\tb\tz\n9.99\t12\tfalse\t");
    }

    #[test]
    fn test_single_column_blank_cells_are_empty_lines() {
        let dataset = Dataset::from_csv_str("a\n,\nx").unwrap();
        assert_eq!(dataset.to_tsv_string().unwrap(), "a\n\nx");

        let mut row = Record::new();
        row.insert("a".into(), CellValue::Null);
        let dataset = Dataset::from_records(vec![row.clone(), row]);
        assert_eq!(dataset.to_tsv_string().unwrap(), "a\n\n");
    }

    #[test]
    fn test_single_blank_header() {
        let mut row = Record::new();
        row.insert(String::new(), CellValue::from("v"));
        let dataset = Dataset::from_records(vec![row]);
        assert_eq!(dataset.to_tsv_string().unwrap(), "\nv");
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        assert!(matches!(
            Dataset::new().to_tsv_string(),
            Err(SheetError::EmptyData)
        ));
    }
}
