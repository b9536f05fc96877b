use crate::cell::CellValue;
use crate::dataset::{Dataset, Record};
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &str = "\u{feff}";

/// CSV reader options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions { delimiter: b',' }
    }
}

impl CsvOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Dataset {
    /// Load a dataset from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut bytes = Vec::new();
        BufReader::new(file).read_to_end(&mut bytes)?;
        Self::from_csv_bytes(&bytes, &CsvOptions::default())
    }

    /// Load a dataset from raw CSV bytes, decoding them as UTF-8 (lossily)
    pub fn from_csv_bytes(bytes: &[u8], options: &CsvOptions) -> Result<Self> {
        Self::from_csv_str_with_options(&String::from_utf8_lossy(bytes), options)
    }

    /// Load a dataset from a CSV string
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_str_with_options(content, &CsvOptions::default())
    }

    /// Load a dataset from a CSV string with custom options
    ///
    /// The first line is the header, even when it is blank. Lines end at
    /// `\n`, with one `\r` before it dropped. Fields are split on the
    /// delimiter only: quotes have no special meaning. A line shorter than the
    /// header leaves its trailing columns `Null`; extra fields past the header
    /// are dropped. Blank lines after the header produce no record.
    pub fn from_csv_str_with_options(content: &str, options: &CsvOptions) -> Result<Self> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        if content.is_empty() {
            return Ok(Dataset::new());
        }

        let (header_line, body) = content.split_once('\n').unwrap_or((content, ""));
        let header_line = header_line.strip_suffix('\r').unwrap_or(header_line);
        let headers: Vec<String> = match reader(header_line, options).records().next() {
            Some(result) => result?.iter().map(str::to_string).collect(),
            None => vec![String::new()],
        };

        let mut records = Vec::new();
        for result in reader(body, options).records() {
            let mut fields = result?;
            trim_carriage_return(&mut fields);
            if fields.len() == 1 && fields[0].is_empty() {
                continue;
            }

            let mut record = Record::with_capacity(headers.len());
            for (index, header) in headers.iter().enumerate() {
                let value = fields.get(index).map(CellValue::from);
                record.insert(header.clone(), value.into());
            }
            records.push(record);
        }

        debug!(
            columns = headers.len(),
            rows = records.len(),
            "parsed CSV content"
        );

        Ok(Dataset::from_records(records))
    }
}

fn reader<'a>(content: &'a str, options: &CsvOptions) -> csv::Reader<&'a [u8]> {
    csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quoting(false)
        .flexible(true)
        .has_headers(false) // We handle headers ourselves
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(content.as_bytes())
}

/// Drop the `\r` of a `\r\n` line ending from the last field.
fn trim_carriage_return(fields: &mut csv::StringRecord) {
    let Some(last) = fields.iter().last() else {
        return;
    };
    if let Some(trimmed) = last.strip_suffix('\r') {
        let mut cleaned: csv::StringRecord = fields.iter().take(fields.len() - 1).collect();
        cleaned.push_field(trimmed);
        *fields = cleaned;
    }
}
