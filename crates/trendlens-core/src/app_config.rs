use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML taxonomy file. `None` means the built-in taxonomy is used.
    pub taxonomy_path: Option<PathBuf>,
    /// Upper bound on records evaluated by one trend analysis run.
    pub max_batch_size: usize,
    /// Minimum number of records that must share a caption keyword before it
    /// becomes a keyword trend candidate.
    pub keyword_min_records: usize,
}
