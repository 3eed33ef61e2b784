//! Field-level rules for combining a primary and a secondary record.

use shared_types::{Channel, MatchConfidence, MergedRecord, SourceRecord};

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn prefer(primary: &Option<String>, secondary: &Option<String>) -> Option<String> {
    present(primary).or_else(|| present(secondary))
}

fn prefer_name(primary: &str, secondary: &str) -> String {
    if primary.trim().is_empty() {
        secondary.to_string()
    } else {
        primary.to_string()
    }
}

/// Merge a linked pair. Shared fields come from the primary record when it
/// has them; notes and labels are primary-only; profile_url is
/// secondary-only.
pub fn merge_pair(
    primary: &SourceRecord,
    primary_index: usize,
    secondary: &SourceRecord,
    secondary_index: usize,
    confidence: MatchConfidence,
) -> MergedRecord {
    let phone = prefer(&primary.phone, &secondary.phone);
    MergedRecord {
        first_name: prefer_name(&primary.first_name, &secondary.first_name),
        last_name: prefer_name(&primary.last_name, &secondary.last_name),
        email: prefer(&primary.email, &secondary.email),
        channel: Channel::for_phone(phone.as_deref()),
        phone,
        company: prefer(&primary.company, &secondary.company),
        role: prefer(&primary.role, &secondary.role),
        notes: present(&primary.notes),
        profile_url: present(&secondary.profile_url),
        labels: primary.labels.clone(),
        confidence,
        primary_index: Some(primary_index),
        secondary_index: Some(secondary_index),
    }
}

/// A primary record nothing on the secondary side claimed.
pub fn primary_only(primary: &SourceRecord, primary_index: usize) -> MergedRecord {
    let phone = present(&primary.phone);
    MergedRecord {
        first_name: primary.first_name.clone(),
        last_name: primary.last_name.clone(),
        email: present(&primary.email),
        channel: Channel::for_phone(phone.as_deref()),
        phone,
        company: present(&primary.company),
        role: present(&primary.role),
        notes: present(&primary.notes),
        profile_url: None,
        labels: primary.labels.clone(),
        confidence: MatchConfidence::None,
        primary_index: Some(primary_index),
        secondary_index: None,
    }
}

/// A secondary record no primary record claimed.
pub fn secondary_only(secondary: &SourceRecord, secondary_index: usize) -> MergedRecord {
    let phone = present(&secondary.phone);
    MergedRecord {
        first_name: secondary.first_name.clone(),
        last_name: secondary.last_name.clone(),
        email: present(&secondary.email),
        channel: Channel::for_phone(phone.as_deref()),
        phone,
        company: present(&secondary.company),
        role: present(&secondary.role),
        notes: None,
        profile_url: present(&secondary.profile_url),
        labels: Vec::new(),
        confidence: MatchConfidence::None,
        primary_index: None,
        secondary_index: Some(secondary_index),
    }
}
