// Runtime configuration, read once from the environment in `main` and then
// passed by value to the components that need it.

use std::path::{Path, PathBuf};

use crate::calendar::City;

/// Rows shown per page of raw data.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the three city CSV files.
    pub data_dir: PathBuf,
    /// Print diagnostics for rejected input and failed loads.
    pub debug: bool,
    pub page_size: usize,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            debug: false,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build from `BIKESHARE_DATA_DIR` and `BIKESHARE_DEBUG`.
    ///
    /// Without `BIKESHARE_DATA_DIR` the current directory is used if it holds
    /// any city file, then `<data dir>/bikeshare` if that exists.
    pub fn from_env() -> Self {
        let data_dir = std::env::var_os("BIKESHARE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let debug = std::env::var("BIKESHARE_DEBUG")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Config::new(data_dir).with_debug(debug)
    }
}

fn default_data_dir() -> PathBuf {
    let cwd = PathBuf::from(".");
    if holds_city_data(&cwd) {
        return cwd;
    }
    match dirs::data_dir().map(|d| d.join("bikeshare")) {
        Some(dir) if holds_city_data(&dir) => dir,
        _ => cwd,
    }
}

fn holds_city_data(dir: &Path) -> bool {
    City::ALL.iter().any(|c| dir.join(c.file_name()).is_file())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
