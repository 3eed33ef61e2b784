use csv::{ReaderBuilder, StringRecord};
use shared_types::IngestionError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header row plus the data rows that decoded cleanly.
#[derive(Debug)]
pub struct CsvRows {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read `content` as a headed CSV. Rows may be shorter or longer than the
    /// header; rows the reader cannot decode are skipped with a warning.
    ///
    /// `label` names the input in errors and logs.
    pub fn parse_rows(&self, content: &[u8], label: &str) -> Result<CsvRows, IngestionError> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| IngestionError::ParseError(format!("{label}: {e}")))?
            .clone();

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(IngestionError::MissingHeader(label.to_string()));
        }

        let mut rows = Vec::new();

        for result in reader.records() {
            match result {
                Ok(record) => rows.push(record),
                Err(e) => match error_line(&e) {
                    Some(line) => {
                        tracing::warn!("Skipping unreadable CSV row at line {} in {}: {}", line, label, e)
                    }
                    None => tracing::warn!("Skipping unreadable CSV row in {}: {}", label, e),
                },
            }
        }

        Ok(CsvRows { headers, rows })
    }
}

/// Line the failing record starts on. Quoted fields may span several lines,
/// so this is not the record count.
fn error_line(error: &csv::Error) -> Option<u64> {
    error.position().map(|p| p.line())
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}
