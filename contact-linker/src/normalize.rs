//! Comparison keys for names, companies and emails.
//!
//! Only ASCII letters are case-folded. Accented or non-Latin names are
//! compared after trimming and ASCII lowering alone, so two visually
//! identical names in different Unicode forms will not match.

use shared_types::SourceRecord;

/// Lowercase, trim, and collapse internal whitespace runs to one space.
pub fn normalize_name(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and trim. Internal whitespace is kept as-is, so `"Acme  Co"`
/// and `"Acme Co"` are different keys.
pub fn normalize_company(company: Option<&str>) -> Option<String> {
    let key = company?.trim().to_ascii_lowercase();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

pub fn normalize_email(email: Option<&str>) -> Option<String> {
    let key = email?.trim().to_ascii_lowercase();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Derived keys on a [`SourceRecord`].
pub trait RecordKeys {
    fn normalized_name(&self) -> String;
    fn normalized_company(&self) -> Option<String>;
    fn normalized_email(&self) -> Option<String>;
}

impl RecordKeys for SourceRecord {
    fn normalized_name(&self) -> String {
        normalize_name(&self.full_name())
    }

    fn normalized_company(&self) -> Option<String> {
        normalize_company(self.company.as_deref())
    }

    fn normalized_email(&self) -> Option<String> {
        normalize_email(self.email.as_deref())
    }
}
