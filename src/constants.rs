/// Default values shared between the config layer and the CLI
/// so the two never drift apart.

// Default pipeline inputs/outputs
pub const DEFAULT_INPUT: &str = "training.1600000.processed.noemoticon.csv";
pub const DEFAULT_DATABASE: &str = "social.db";
pub const DEFAULT_TABLE: &str = "posts";
pub const DEFAULT_SAMPLE_SIZE: usize = 500_000;
pub const DEFAULT_ENCODING: &str = "latin-1";

// Config file looked up in the working directory
pub const CONFIG_PATH: &str = "config.toml";

// Stats command defaults
pub const DEFAULT_TOP_HASHTAGS: usize = 10;
pub const MONTHLY_SERIES_LIMIT: usize = 12;

// Keywords shorter than this are dropped from free-text search,
// matching the dashboard's query behavior
pub const MIN_KEYWORD_LEN: usize = 4;
