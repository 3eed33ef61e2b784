mod csv_parser;
mod header_map;
mod processors;

pub use csv_parser::{CsvParser, CsvRows};
pub use header_map::{ContactField, HeaderMap, HEADER_ALIASES};

use processors::process_contacts;
use shared_types::{ContactSource, IngestionError, Origin, SourceRecord};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads contact CSV exports (LinkedIn connections, address-book CSVs) into
/// [`SourceRecord`]s stamped with one origin.
pub struct ContactCsvExtractor {
    csv_parser: CsvParser,
    origin: Origin,
}

impl ContactCsvExtractor {
    pub fn new(origin: Origin) -> Self {
        Self {
            csv_parser: CsvParser::new(),
            origin,
        }
    }

    pub fn with_parser(origin: Origin, csv_parser: CsvParser) -> Self {
        Self { csv_parser, origin }
    }

    pub fn parse(&self, path: &Path) -> Result<Vec<SourceRecord>, IngestionError> {
        if !path.is_file() {
            return Err(IngestionError::SourceNotFound(path.to_path_buf()));
        }

        let content = fs::read(path)?;
        self.parse_bytes(&content, &path.display().to_string())
    }

    pub fn parse_bytes(
        &self,
        content: &[u8],
        label: &str,
    ) -> Result<Vec<SourceRecord>, IngestionError> {
        let parsed = self.csv_parser.parse_rows(content, label)?;
        let headers = HeaderMap::from_headers(parsed.headers.iter());

        if headers.is_empty() {
            tracing::warn!("No recognised contact columns in {}", label);
        }

        let records = process_contacts(&parsed.rows, &headers, self.origin);
        tracing::info!(
            "Parsed {} {} contacts from {} ({} rows)",
            records.len(),
            self.origin,
            label,
            parsed.rows.len()
        );

        Ok(records)
    }
}

/// A contact CSV on disk, ready to be handed to the CLI as a [`ContactSource`].
pub struct CsvContactFile {
    path: PathBuf,
    extractor: ContactCsvExtractor,
}

impl CsvContactFile {
    pub fn new(path: impl Into<PathBuf>, origin: Origin) -> Self {
        Self {
            path: path.into(),
            extractor: ContactCsvExtractor::new(origin),
        }
    }

    pub fn with_parser(path: impl Into<PathBuf>, origin: Origin, csv_parser: CsvParser) -> Self {
        Self {
            path: path.into(),
            extractor: ContactCsvExtractor::with_parser(origin, csv_parser),
        }
    }
}

impl ContactSource for CsvContactFile {
    fn load(&self) -> Result<Vec<SourceRecord>, IngestionError> {
        self.extractor.parse(&self.path)
    }

    fn origin(&self) -> Origin {
        self.extractor.origin
    }

    fn describe(&self) -> String {
        format!("CSV export {}", self.path.display())
    }
}
