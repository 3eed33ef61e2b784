use crate::export::ExportFormat;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_PATH: &str = "./data/outreach.csv";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub output: Option<OutputConfig>,
    pub ingest: Option<IngestConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub format: Option<ExportFormat>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IngestConfig {
    /// Single-character field delimiter for CSV exports.
    pub delimiter: Option<String>,
}

const DEFAULT_CONFIG: &str = r#"
[output]
# path = "./data/outreach.csv"
# format = "csv"  # or "json"

[ingest]
# delimiter = ","
"#;

impl AppConfig {
    /// Load from the per-user config file, writing a commented default on
    /// first run.
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?;

        builder.try_deserialize()
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .as_ref()
            .and_then(|o| o.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
    }

    pub fn output_format(&self) -> Option<ExportFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }

    pub fn csv_delimiter(&self) -> Result<u8, ConfigError> {
        match self.ingest.as_ref().and_then(|i| i.delimiter.as_deref()) {
            None => Ok(b','),
            Some(d) if d.len() == 1 && d.is_ascii() => Ok(d.as_bytes()[0]),
            Some(d) => Err(ConfigError::Message(format!(
                "ingest.delimiter must be a single ASCII character, got {d:?}"
            ))),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("netnudge").join("netnudge.toml")
    } else {
        PathBuf::from("netnudge.toml")
    }
}
