use crate::constants;
use crate::error::Result;
use crate::pipeline::encoding::TextEncoding;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Pipeline configuration, loaded from `config.toml` when present and
/// overridable field by field from the command line.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the raw dataset (headerless 6-column CSV)
    pub input: PathBuf,
    /// SQLite database the destination table lives in
    pub database: PathBuf,
    /// Destination table name
    pub table: String,
    /// Number of posts to sample into the destination table
    pub sample_size: usize,
    /// Text encoding of the input file. Mis-specifying this silently
    /// corrupts all extracted text, so it is an explicit setting rather
    /// than a hidden default.
    pub encoding: TextEncoding,
    /// Optional RNG seed for reproducible sampling. Unset means each run
    /// draws a different sample.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(constants::DEFAULT_INPUT),
            database: PathBuf::from(constants::DEFAULT_DATABASE),
            table: constants::DEFAULT_TABLE.to_string(),
            sample_size: constants::DEFAULT_SAMPLE_SIZE,
            encoding: TextEncoding::Latin1,
            seed: None,
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to the
    /// built-in defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(constants::CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
