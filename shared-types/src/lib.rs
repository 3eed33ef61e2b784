pub mod contact;
pub mod merged_contact;
pub mod source;

pub use contact::{Origin, SourceRecord};
pub use merged_contact::{Channel, MatchConfidence, MergedRecord};
pub use source::{ContactSource, IngestionError};
