use super::header_map::{ContactField, HeaderMap};
use csv::StringRecord;
use shared_types::{Origin, SourceRecord};

fn field(row: &StringRecord, headers: &HeaderMap, field: ContactField) -> Option<String> {
    headers
        .column(field)
        .and_then(|i| row.get(i))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Address-book exports list several groups in one cell, e.g.
/// `* myContacts ::: Friends`. The leading `*` marks a system group.
fn split_labels(cell: &str) -> Vec<String> {
    cell.split(":::")
        .map(|label| label.trim().trim_start_matches('*').trim())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn one CSV row into a contact, or `None` when it has no usable name.
///
/// Notes and labels are kept only for primary records, profile URLs only for
/// secondary ones.
pub fn process_contact_row(
    row: &StringRecord,
    headers: &HeaderMap,
    origin: Origin,
) -> Option<SourceRecord> {
    let first_name = field(row, headers, ContactField::FirstName).unwrap_or_default();
    let last_name = field(row, headers, ContactField::LastName).unwrap_or_default();

    if first_name.is_empty() && last_name.is_empty() {
        return None;
    }

    let (notes, labels, profile_url) = match origin {
        Origin::Primary => (
            field(row, headers, ContactField::Notes),
            field(row, headers, ContactField::Labels)
                .map(|cell| split_labels(&cell))
                .unwrap_or_default(),
            None,
        ),
        Origin::Secondary => (
            None,
            Vec::new(),
            field(row, headers, ContactField::ProfileUrl),
        ),
    };

    Some(SourceRecord {
        first_name,
        last_name,
        email: field(row, headers, ContactField::Email),
        phone: field(row, headers, ContactField::Phone),
        company: field(row, headers, ContactField::Company),
        role: field(row, headers, ContactField::Role),
        notes,
        profile_url,
        labels,
        origin,
    })
}

pub fn process_contacts(
    rows: &[StringRecord],
    headers: &HeaderMap,
    origin: Origin,
) -> Vec<SourceRecord> {
    rows.iter()
        .filter_map(|row| process_contact_row(row, headers, origin))
        .collect()
}
