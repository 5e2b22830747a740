use std::env;
use std::path::PathBuf;

use crate::logging;

pub const CATALOGUE_ENV: &str = "QABANK_CATALOGUE";
pub const DATA_DIR_ENV: &str = "QABANK_DATA_DIR";
pub const LOG_DIR_ENV: &str = "QABANK_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "QABANK_LOG";

const APP_DIR_NAME: &str = "qabank";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` means the built-in catalogue.
    pub catalogue_path: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn load(catalogue_flag: Option<PathBuf>) -> Self {
        Self::from_lookup(catalogue_flag, |key| env::var(key).ok())
    }

    fn from_lookup<F>(catalogue_flag: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let catalogue_path = catalogue_flag.or_else(|| var(CATALOGUE_ENV).map(PathBuf::from));

        let data_dir = var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let log_dir = var(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("logs"));

        let log_level = var(LOG_LEVEL_ENV)
            .unwrap_or_else(|| logging::default_log_level().to_string());

        Self {
            catalogue_path,
            data_dir,
            log_dir,
            log_level,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
