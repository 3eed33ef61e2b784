use serde::{Deserialize, Serialize};

/// Which of the two input lists a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// The address-book export (Google Contacts, vCard, ...).
    Primary,
    /// The professional-network export (LinkedIn connections CSV).
    Secondary,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// One contact as reported by a single origin, before any merging.
///
/// Optional fields are `None` when the source had nothing for them; ingestion
/// never stores an empty string in an optional field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
    pub profile_url: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub origin: Origin,
}

impl SourceRecord {
    pub fn new(origin: Origin, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            phone: None,
            company: None,
            role: None,
            notes: None,
            profile_url: None,
            labels: Vec::new(),
            origin,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// `first_name + " " + last_name`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// A record needs at least one non-blank name part to be matchable.
    pub fn is_valid(&self) -> bool {
        !self.first_name.trim().is_empty() || !self.last_name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_trims_missing_parts() {
        let only_first = SourceRecord::new(Origin::Primary, "Cher", "");
        assert_eq!(only_first.full_name(), "Cher");

        let only_last = SourceRecord::new(Origin::Secondary, "", "Prince");
        assert_eq!(only_last.full_name(), "Prince");

        let both = SourceRecord::new(Origin::Primary, "Jane", "Doe");
        assert_eq!(both.full_name(), "Jane Doe");
    }

    #[test]
    fn test_is_valid_requires_a_name() {
        assert!(SourceRecord::new(Origin::Primary, "Jane", "").is_valid());
        assert!(!SourceRecord::new(Origin::Primary, "  ", "").is_valid());
    }

    #[test]
    fn test_origin_serialization() {
        let json = serde_json::to_string(&Origin::Secondary).unwrap();
        assert_eq!(json, "\"secondary\"");
    }
}
