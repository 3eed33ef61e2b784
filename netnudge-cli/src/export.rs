use anyhow::{Context, Result};
use contact_linker::MatchSummary;
use serde::{Deserialize, Serialize};
use shared_types::MergedRecord;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Flag, then config, then the output file's extension, then CSV.
    pub fn resolve(flag: Option<Self>, configured: Option<Self>, output: &Path) -> Self {
        flag.or(configured)
            .or_else(|| Self::from_extension(output))
            .unwrap_or(Self::Csv)
    }

    fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

const OUTREACH_HEADERS: [&str; 9] = [
    "Name",
    "Company",
    "Phone",
    "Email",
    "LinkedIn URL",
    "Channel",
    "Match Confidence",
    "Message",
    "Sent",
];

/// One row of the outreach sheet handed to the message-drafting stage.
#[derive(Debug, Serialize)]
struct OutreachRow<'a> {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Phone")]
    phone: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "LinkedIn URL")]
    profile_url: &'a str,
    #[serde(rename = "Channel")]
    channel: &'static str,
    #[serde(rename = "Match Confidence")]
    confidence: &'static str,
    #[serde(rename = "Message")]
    message: &'a str,
    #[serde(rename = "Sent")]
    sent: &'static str,
}

impl<'a> From<&'a MergedRecord> for OutreachRow<'a> {
    fn from(record: &'a MergedRecord) -> Self {
        Self {
            name: record.full_name(),
            company: record.company.as_deref().unwrap_or_default(),
            phone: record.phone.as_deref().unwrap_or_default(),
            email: record.email.as_deref().unwrap_or_default(),
            profile_url: record.profile_url.as_deref().unwrap_or_default(),
            channel: record.channel.label(),
            confidence: record.confidence.label(),
            message: "",
            sent: "FALSE",
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportMeta {
    generated_at: String,
    engine_version: &'static str,
}

#[derive(Debug, Serialize)]
struct MatchReport<'a> {
    meta: ReportMeta,
    summary: &'a MatchSummary,
    contacts: &'a [MergedRecord],
}

pub fn write_csv<W: Write>(writer: W, records: &[MergedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    // serialize() only emits the header alongside the first row.
    if records.is_empty() {
        writer.write_record(OUTREACH_HEADERS)?;
    }
    for record in records {
        writer.serialize(OutreachRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(
    writer: W,
    records: &[MergedRecord],
    summary: &MatchSummary,
) -> Result<()> {
    let report = MatchReport {
        meta: ReportMeta {
            generated_at: chrono::Utc::now().to_rfc3339(),
            engine_version: env!("CARGO_PKG_VERSION"),
        },
        summary,
        contacts: records,
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

/// Write `records` to `path`, creating parent directories as needed.
pub fn write_report(
    path: &Path,
    format: ExportFormat,
    records: &[MergedRecord],
    summary: &MatchSummary,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file {:?}", path))?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_csv(&mut writer, records)?,
        ExportFormat::Json => write_json(&mut writer, records, summary)?,
    }
    writer.flush()?;

    tracing::info!("Wrote {} contacts to {:?} as {:?}", records.len(), path, format);
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Channel, MatchConfidence};

    fn merged() -> Vec<MergedRecord> {
        vec![
            MergedRecord {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: Some("jane@x.com".to_string()),
                phone: None,
                company: Some("Initech, Inc".to_string()),
                role: None,
                notes: None,
                profile_url: Some("u1".to_string()),
                labels: vec![],
                confidence: MatchConfidence::High,
                channel: Channel::Linkedin,
                primary_index: Some(0),
                secondary_index: Some(0),
            },
            MergedRecord {
                first_name: "Bob".to_string(),
                last_name: "Lee".to_string(),
                email: None,
                phone: Some("+15551234567".to_string()),
                company: None,
                role: None,
                notes: None,
                profile_url: None,
                labels: vec![],
                confidence: MatchConfidence::None,
                channel: Channel::Sms,
                primary_index: Some(1),
                secondary_index: None,
            },
        ]
    }

    #[test]
    fn test_resolve_format() {
        let json = Path::new("out/report.JSON");
        let plain = Path::new("out/report");

        assert_eq!(ExportFormat::resolve(None, None, json), ExportFormat::Json);
        assert_eq!(ExportFormat::resolve(None, None, plain), ExportFormat::Csv);
        assert_eq!(
            ExportFormat::resolve(None, Some(ExportFormat::Csv), json),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::resolve(Some(ExportFormat::Json), Some(ExportFormat::Csv), plain),
            ExportFormat::Json
        );
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&mut out, &merged()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Name,Company,Phone,Email,LinkedIn URL,Channel,Match Confidence,Message,Sent"
        );
        assert_eq!(
            lines[1],
            "Jane Doe,\"Initech, Inc\",,jane@x.com,u1,LinkedIn,High,,FALSE"
        );
        assert_eq!(lines[2], "Bob Lee,,+15551234567,,,SMS,N/A,,FALSE");
    }

    #[test]
    fn test_write_csv_without_records_keeps_header() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap().trim_end(),
            OUTREACH_HEADERS.join(",")
        );
    }

    #[test]
    fn test_write_json() {
        let records = merged();
        let summary = MatchSummary::from_records(&records);

        let mut out = Vec::new();
        write_json(&mut out, &records, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["summary"]["high"], 1);
        assert_eq!(value["summary"]["none"], 1);
        assert_eq!(value["contacts"].as_array().unwrap().len(), 2);
        assert_eq!(value["contacts"][1]["channel"], "sms");
        assert!(value["meta"]["generated_at"].is_string());
    }
}
