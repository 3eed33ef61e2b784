use serde::Serialize;
use shared_types::{MatchConfidence, MergedRecord};
use std::fmt;

/// Per-confidence counts over one run's output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub high: usize,
    pub medium: usize,
    pub none: usize,
    pub total: usize,
}

impl MatchSummary {
    pub fn from_records(records: &[MergedRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            match record.confidence {
                MatchConfidence::High => summary.high += 1,
                MatchConfidence::Medium => summary.medium += 1,
                MatchConfidence::None => summary.none += 1,
            }
        }
        summary.total = records.len();
        summary
    }

    pub fn linked(&self) -> usize {
        self.high + self.medium
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matched: {} high, {} medium, {} unmatched",
            self.high, self.medium, self.none
        )
    }
}
