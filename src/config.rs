use std::path::PathBuf;

use crate::history::DEFAULT_HISTORY_KEY;

const APP_NAME: &str = "cgpa-tracker";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "CGPA_DATA_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub history_key: String,
}

impl Config {
    /// An explicit directory wins, then `CGPA_DATA_DIR`, then the platform data dir.
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        let env_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::resolve_from(data_dir, env_dir)
    }

    fn resolve_from(flag: Option<PathBuf>, env_dir: Option<PathBuf>) -> Self {
        let data_dir = flag.or(env_dir).unwrap_or_else(default_data_dir);
        Self {
            data_dir,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join(APP_NAME),
        None => PathBuf::from(format!(".{APP_NAME}")),
    }
}
