use crate::index::SecondaryIndex;
use crate::merge::{merge_pair, primary_only, secondary_only};
use crate::normalize::RecordKeys;
use shared_types::{MatchConfidence, MergedRecord, SourceRecord};

/// Which rule paired a primary record with a secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Email,
    NameCompany,
    Name,
}

impl MatchTier {
    pub fn confidence(&self) -> MatchConfidence {
        match self {
            Self::Email | Self::NameCompany => MatchConfidence::High,
            Self::Name => MatchConfidence::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::NameCompany => "name_company",
            Self::Name => "name",
        }
    }
}

/// Greedy linker over one secondary list.
///
/// The claimed set lives inside a single [`Linker::link`] call, so a linker
/// can be reused for several primary lists without one run's claims leaking
/// into the next.
pub struct Linker<'a> {
    secondary: &'a [SourceRecord],
    index: SecondaryIndex,
}

impl<'a> Linker<'a> {
    pub fn new(secondary: &'a [SourceRecord]) -> Self {
        Self {
            secondary,
            index: SecondaryIndex::build(secondary),
        }
    }

    pub fn index(&self) -> &SecondaryIndex {
        &self.index
    }

    /// Link every primary record, then append the unclaimed secondary ones.
    ///
    /// The output holds one record per primary entry, in primary order,
    /// followed by one record per never-claimed secondary entry, in secondary
    /// order.
    pub fn link(&self, primary: &[SourceRecord]) -> Vec<MergedRecord> {
        let mut claimed = vec![false; self.secondary.len()];
        let mut merged = Vec::with_capacity(primary.len() + self.secondary.len());

        for (p_idx, record) in primary.iter().enumerate() {
            match self.find_match(record, &claimed) {
                Some((s_idx, tier)) => {
                    claimed[s_idx] = true;
                    tracing::debug!(
                        primary = p_idx,
                        secondary = s_idx,
                        tier = tier.as_str(),
                        "linked contact"
                    );
                    merged.push(merge_pair(
                        record,
                        p_idx,
                        &self.secondary[s_idx],
                        s_idx,
                        tier.confidence(),
                    ));
                }
                None => merged.push(primary_only(record, p_idx)),
            }
        }

        for (s_idx, record) in self.secondary.iter().enumerate() {
            if !claimed[s_idx] {
                merged.push(secondary_only(record, s_idx));
            }
        }

        merged
    }

    /// Tiers are tried in a fixed order and the first hit wins. An email or
    /// name+company key pointing at an already claimed record falls through
    /// to the next tier.
    fn find_match(&self, record: &SourceRecord, claimed: &[bool]) -> Option<(usize, MatchTier)> {
        let unclaimed = |idx: &usize| !claimed[*idx];

        if let Some(email) = record.normalized_email() {
            if let Some(idx) = self.index.by_email(&email).filter(unclaimed) {
                return Some((idx, MatchTier::Email));
            }
        }

        let name_key = record.normalized_name();
        if name_key.is_empty() {
            return None;
        }

        if let Some(company) = record.normalized_company() {
            if let Some(idx) = self.index.by_name_company(&name_key, &company).filter(unclaimed) {
                return Some((idx, MatchTier::NameCompany));
            }
        }

        self.index
            .by_name(&name_key)
            .iter()
            .copied()
            .find(unclaimed)
            .map(|idx| (idx, MatchTier::Name))
    }
}

/// Link `primary` against `secondary` in one call.
pub fn link(primary: &[SourceRecord], secondary: &[SourceRecord]) -> Vec<MergedRecord> {
    let merged = Linker::new(secondary).link(primary);
    tracing::info!(
        primary = primary.len(),
        secondary = secondary.len(),
        merged = merged.len(),
        "contact linking finished"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Channel, Origin};

    fn google(first: &str, last: &str) -> SourceRecord {
        SourceRecord::new(Origin::Primary, first, last)
    }

    fn linkedin(first: &str, last: &str) -> SourceRecord {
        SourceRecord::new(Origin::Secondary, first, last)
    }

    #[test]
    fn test_email_match_is_high() {
        let primary = vec![google("Jane", "Doe").with_email("jane@x.com")];
        let secondary = vec![linkedin("Jane", "Doe")
            .with_email("jane@x.com")
            .with_profile_url("u1")];

        let merged = link(&primary, &secondary);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, MatchConfidence::High);
        assert_eq!(merged[0].profile_url.as_deref(), Some("u1"));
        assert_eq!(merged[0].channel, Channel::Linkedin);
    }

    #[test]
    fn test_no_secondary_is_none() {
        let primary = vec![google("Bob", "Lee").with_phone("+15551234567")];

        let merged = link(&primary, &[]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, MatchConfidence::None);
        assert_eq!(merged[0].channel, Channel::Sms);
    }

    #[test]
    fn test_email_is_case_insensitive() {
        let primary = vec![google("J", "D").with_email("Jane@X.com")];
        let secondary = vec![linkedin("Someone", "Else").with_email("jane@x.COM")];

        let merged = link(&primary, &secondary);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, MatchConfidence::High);
        assert_eq!(merged[0].secondary_index, Some(0));
    }

    #[test]
    fn test_name_company_beats_name_only() {
        let primary = vec![google("Sam", "Lee").with_company("Acme")];
        let secondary = vec![
            linkedin("Sam", "Lee").with_company("Globex"),
            linkedin("Sam", "Lee").with_company("ACME"),
        ];

        let merged = link(&primary, &secondary);

        assert_eq!(merged[0].confidence, MatchConfidence::High);
        assert_eq!(merged[0].secondary_index, Some(1));
        // The Globex entry is left over.
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].secondary_index, Some(0));
        assert_eq!(merged[1].confidence, MatchConfidence::None);
    }

    #[test]
    fn test_name_tier_picks_first_unclaimed() {
        let primary = vec![google("Sam", "Lee"), google("Sam", "Lee"), google("Sam", "Lee")];
        let secondary = vec![linkedin("Sam", "Lee"), linkedin("sam", "lee")];

        let merged = link(&primary, &secondary);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].secondary_index, Some(0));
        assert_eq!(merged[0].confidence, MatchConfidence::Medium);
        assert_eq!(merged[1].secondary_index, Some(1));
        assert_eq!(merged[2].secondary_index, None);
        assert_eq!(merged[2].confidence, MatchConfidence::None);
    }

    #[test]
    fn test_claimed_email_falls_through_to_name() {
        let primary = vec![
            google("Jane", "Doe").with_email("jane@x.com"),
            google("Jane", "Doe").with_email("jane@x.com"),
        ];
        let secondary = vec![
            linkedin("Jane", "Doe"),
            linkedin("Jane", "Doe").with_email("jane@x.com"),
        ];

        let merged = link(&primary, &secondary);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].secondary_index, Some(1));
        assert_eq!(merged[0].confidence, MatchConfidence::High);
        assert_eq!(merged[1].secondary_index, Some(0));
        assert_eq!(merged[1].confidence, MatchConfidence::Medium);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(link(&[], &[]).is_empty());
    }

    #[test]
    fn test_linker_reuse_starts_fresh() {
        let secondary = vec![linkedin("Ann", "Lee")];
        let linker = Linker::new(&secondary);

        let first = linker.link(&[google("Ann", "Lee")]);
        let second = linker.link(&[google("Ann", "Lee")]);

        assert_eq!(first, second);
        assert_eq!(second[0].confidence, MatchConfidence::Medium);
    }
}
