pub mod config;
pub mod export;
pub mod pipeline;

pub use config::AppConfig;
pub use export::{write_report, ExportFormat};
pub use pipeline::{filter_by_groups, inspect_secondary, run_match, source_for_path, MatchRun};
