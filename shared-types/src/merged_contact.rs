use serde::{Deserialize, Serialize};

/// How strongly a merged record's two sides were linked.
///
/// Variants are declared weakest first so the derived ordering gives
/// `High > Medium > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchConfidence {
    /// Present in only one source.
    None,
    /// Normalized full name matched.
    Medium,
    /// Email matched, or name and company both matched.
    High,
}

impl MatchConfidence {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::None => "N/A",
        }
    }
}

impl std::fmt::Display for MatchConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outreach channel derived from the merged fields.
///
/// There is deliberately no "none" variant: a record without a phone is
/// always routed to its profile link, even when it has no profile URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    Sms,
    Linkedin,
}

impl Channel {
    pub fn for_phone(phone: Option<&str>) -> Self {
        match phone {
            Some(phone) if !phone.trim().is_empty() => Self::Sms,
            _ => Self::Linkedin,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Linkedin => "LinkedIn",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The linker's output unit: one or two source records unified under a
/// confidence tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
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
    pub confidence: MatchConfidence,
    pub channel: Channel,
    /// Position of the contributing record in the primary input, if any.
    pub primary_index: Option<usize>,
    /// Position of the contributing record in the secondary input, if any.
    pub secondary_index: Option<usize>,
}

impl MergedRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_linked(&self) -> bool {
        self.primary_index.is_some() && self.secondary_index.is_some()
    }
}
