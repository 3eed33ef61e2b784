//! Extractors Crate
//!
//! Ingestion adapters that turn contact exports into
//! [`SourceRecord`](shared_types::SourceRecord)s for the linker.
//!
//! # Available Extractors
//!
//! - `ContactCsvExtractor`: header-tolerant CSV reader (LinkedIn connections
//!   export, address-book CSV exports)
//! - `VcardExtractor`: `.vcf` address-book exports
//!
//! Both have a file-backed wrapper (`CsvContactFile`, `VcardFile`) that
//! implements [`ContactSource`].
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::ContactCsvExtractor;
//! use shared_types::Origin;
//!
//! let extractor = ContactCsvExtractor::new(Origin::Secondary);
//! let contacts = extractor.parse(Path::new("Connections.csv"))?;
//! ```

pub mod contact_csv;
pub mod vcard;

// Re-export commonly used types
pub use contact_csv::{ContactCsvExtractor, CsvContactFile, CsvParser};
pub use vcard::{VcardExtractor, VcardFile};

// Re-export the ContactSource trait from shared-types for convenience
pub use shared_types::ContactSource;
