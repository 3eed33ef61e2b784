use crate::normalize::RecordKeys;
use serde::Serialize;
use shared_types::SourceRecord;
use std::collections::HashMap;

/// Lookup structures over the secondary list, keyed by normalized values and
/// pointing at positions in that list.
///
/// `by_email` and `by_name_company` keep the *last* record seen for a key; an
/// earlier record sharing the key stays reachable only through `by_name`.
#[derive(Debug, Default)]
pub struct SecondaryIndex {
    by_email: HashMap<String, usize>,
    by_name: HashMap<String, Vec<usize>>,
    /// name key -> company key -> index
    by_name_company: HashMap<String, HashMap<String, usize>>,
    len: usize,
    shadowed_emails: usize,
    shadowed_name_companies: usize,
}

impl SecondaryIndex {
    pub fn build(records: &[SourceRecord]) -> Self {
        let mut index = Self {
            len: records.len(),
            ..Self::default()
        };

        for (i, record) in records.iter().enumerate() {
            if let Some(email) = record.normalized_email() {
                if let Some(previous) = index.by_email.insert(email, i) {
                    tracing::debug!(previous, replaced_by = i, "duplicate secondary email");
                    index.shadowed_emails += 1;
                }
            }

            let name_key = record.normalized_name();
            if name_key.is_empty() {
                continue;
            }

            if let Some(company_key) = record.normalized_company() {
                if let Some(previous) = index
                    .by_name_company
                    .entry(name_key.clone())
                    .or_default()
                    .insert(company_key, i)
                {
                    tracing::debug!(previous, replaced_by = i, "duplicate secondary name+company");
                    index.shadowed_name_companies += 1;
                }
            }

            index.by_name.entry(name_key).or_default().push(i);
        }

        index
    }

    pub fn by_email(&self, email_key: &str) -> Option<usize> {
        self.by_email.get(email_key).copied()
    }

    pub fn by_name_company(&self, name_key: &str, company_key: &str) -> Option<usize> {
        self.by_name_company
            .get(name_key)
            .and_then(|companies| companies.get(company_key))
            .copied()
    }

    /// All indices sharing `name_key`, in secondary-list order.
    pub fn by_name(&self, name_key: &str) -> &[usize] {
        self.by_name.get(name_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of records the index was built over.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.len,
            distinct_emails: self.by_email.len(),
            distinct_names: self.by_name.len(),
            duplicate_name_groups: self.by_name.values().filter(|ids| ids.len() > 1).count(),
            shadowed_emails: self.shadowed_emails,
            shadowed_name_companies: self.shadowed_name_companies,
        }
    }
}

/// Shape of a built index, used to spot key collisions in an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub records: usize,
    pub distinct_emails: usize,
    pub distinct_names: usize,
    /// Names shared by more than one record.
    pub duplicate_name_groups: usize,
    /// Records no longer reachable by email because a later record reused it.
    pub shadowed_emails: usize,
    /// Same, for the (name, company) key.
    pub shadowed_name_companies: usize,
}
