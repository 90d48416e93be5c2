use std::path::PathBuf;

use crate::asset::DEFAULT_LOGO_HEIGHT;
use crate::cache::TableSource;
use crate::table;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub teams_csv: Option<PathBuf>,
    pub matches_csv: Option<PathBuf>,
    /// When set, tables are read from SQLite instead of the CSV files.
    pub db_path: Option<PathBuf>,
    pub logo_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            teams_csv: None,
            matches_csv: None,
            db_path: None,
            logo_height: DEFAULT_LOGO_HEIGHT,
        }
    }
}

impl Config {
    /// `.env.local`, then `.env`, then the process environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path_var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        let defaults = Self::default();
        Self {
            data_dir: path_var("LIGA_DATA_DIR").unwrap_or(defaults.data_dir),
            teams_csv: path_var("LIGA_TEAMS_CSV"),
            matches_csv: path_var("LIGA_MATCHES_CSV"),
            db_path: path_var("LIGA_DB"),
            logo_height: lookup("LIGA_LOGO_HEIGHT")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .map(clamp_logo_height)
                .unwrap_or(defaults.logo_height),
        }
    }

    pub fn teams_path(&self) -> PathBuf {
        self.teams_csv
            .clone()
            .unwrap_or_else(|| self.data_dir.join(table::TEAMS_FILE))
    }

    pub fn matches_path(&self) -> PathBuf {
        self.matches_csv
            .clone()
            .unwrap_or_else(|| self.data_dir.join(table::MATCHES_FILE))
    }

    pub fn source(&self) -> TableSource {
        match &self.db_path {
            Some(db) => TableSource::Sqlite(db.clone()),
            None => TableSource::Csv {
                teams: self.teams_path(),
                matches: self.matches_path(),
            },
        }
    }
}

pub fn clamp_logo_height(height: u32) -> u32 {
    height.clamp(8, 256)
}
