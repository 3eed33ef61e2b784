use anyhow::{Context, Result};
use contact_linker::{link, IndexStats, MatchSummary, SecondaryIndex};
use extractors::{CsvContactFile, CsvParser, VcardFile};
use shared_types::{ContactSource, MergedRecord, Origin, SourceRecord};
use std::collections::HashSet;
use std::path::Path;

/// Output of one linking run.
pub struct MatchRun {
    pub primary_count: usize,
    pub secondary_count: usize,
    pub merged: Vec<MergedRecord>,
    pub summary: MatchSummary,
}

/// Pick an ingestion adapter for `path` by its extension: `.vcf` files are
/// read as vCard, everything else as CSV.
pub fn source_for_path(path: &Path, origin: Origin, delimiter: u8) -> Box<dyn ContactSource> {
    let is_vcard = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("vcf"));

    if is_vcard {
        Box::new(VcardFile::new(path, origin))
    } else {
        Box::new(CsvContactFile::with_parser(
            path,
            origin,
            CsvParser::with_delimiter(delimiter),
        ))
    }
}

fn load(source: &dyn ContactSource) -> Result<Vec<SourceRecord>> {
    tracing::info!("Loading {} contacts from {}", source.origin(), source.describe());
    source
        .load()
        .with_context(|| format!("Failed to load {}", source.describe()))
}

/// Keep the primary records carrying at least one of `groups` as a label,
/// compared case-insensitively. No groups keeps everything.
pub fn filter_by_groups(records: Vec<SourceRecord>, groups: &[String]) -> Vec<SourceRecord> {
    if groups.is_empty() {
        return records;
    }

    let wanted: HashSet<String> = groups.iter().map(|g| g.trim().to_lowercase()).collect();
    let before = records.len();
    let kept: Vec<SourceRecord> = records
        .into_iter()
        .filter(|record| {
            record
                .labels
                .iter()
                .any(|label| wanted.contains(&label.trim().to_lowercase()))
        })
        .collect();

    tracing::info!(
        "Group filter {:?} kept {} of {} primary contacts",
        groups,
        kept.len(),
        before
    );
    kept
}

/// Ingest both sides and link them. Any ingestion error aborts the run
/// before matching starts. When `groups` is non-empty only primary contacts
/// in one of those groups take part.
pub fn run_match(
    primary: &dyn ContactSource,
    secondary: &dyn ContactSource,
    groups: &[String],
) -> Result<MatchRun> {
    let primary_records = filter_by_groups(load(primary)?, groups);
    let secondary_records = load(secondary)?;

    let merged = link(&primary_records, &secondary_records);
    let summary = MatchSummary::from_records(&merged);

    Ok(MatchRun {
        primary_count: primary_records.len(),
        secondary_count: secondary_records.len(),
        merged,
        summary,
    })
}

pub fn inspect_secondary(secondary: &dyn ContactSource) -> Result<IndexStats> {
    let records = load(secondary)?;
    Ok(SecondaryIndex::build(&records).stats())
}
