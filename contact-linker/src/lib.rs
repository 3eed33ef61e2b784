//! Contact Linker Crate
//!
//! Reconciles an address-book export (the primary list) with a
//! professional-network export (the secondary list) into one deduplicated
//! list of merged contacts.
//!
//! Pure engine crate: it receives already-loaded [`SourceRecord`]s and returns
//! [`MergedRecord`]s. Ingestion lives in the `extractors` crate.
//!
//! # Matching
//!
//! Each primary record is tried, in order, against:
//!
//! 1. the secondary record with the same email (`High`),
//! 2. the secondary record with the same name and company (`High`),
//! 3. the first unclaimed secondary record with the same name (`Medium`).
//!
//! A secondary record is claimed by at most one primary record per run.
//! Secondary records never claimed are appended with confidence `None`.
//!
//! # Example
//!
//! ```rust
//! use contact_linker::link;
//! use shared_types::{MatchConfidence, Origin, SourceRecord};
//!
//! let primary = vec![SourceRecord::new(Origin::Primary, "Jane", "Doe").with_email("jane@x.com")];
//! let secondary = vec![SourceRecord::new(Origin::Secondary, "Jane", "Doe").with_email("JANE@x.com")];
//!
//! let merged = link(&primary, &secondary);
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].confidence, MatchConfidence::High);
//! ```
//!
//! [`SourceRecord`]: shared_types::SourceRecord
//! [`MergedRecord`]: shared_types::MergedRecord

pub mod index;
pub mod matcher;
pub mod merge;
pub mod normalize;
pub mod summary;

pub use index::{IndexStats, SecondaryIndex};
pub use matcher::{link, Linker, MatchTier};
pub use normalize::{normalize_company, normalize_email, normalize_name, RecordKeys};
pub use summary::MatchSummary;
