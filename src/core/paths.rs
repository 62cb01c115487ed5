//! Database path resolution.
//!
//! The original program resolved a global backing-file path at startup;
//! here the resolved path is explicit state handed to the store.

use crate::constants;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StorePaths {
    pub db_file: PathBuf,
    pub settings_file: PathBuf,
}

impl StorePaths {
    /// Resolve the database location from the CLI arg, the `PASSKEEP_DB`
    /// env var, or the platform data directory, in that order.
    pub fn resolve(db_arg: Option<PathBuf>) -> Self {
        if let Some(db) = db_arg {
            return Self::from_db_file(db);
        }
        if let Ok(db) = env::var("PASSKEEP_DB") {
            if !db.is_empty() {
                return Self::from_db_file(PathBuf::from(db));
            }
        }
        let dir = dirs::data_dir()
            .map(|d| d.join(constants::APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_db_file(dir.join(constants::DB_FILE_NAME))
    }

    /// Derive paths from an explicit database file. The settings file
    /// lives in the same directory.
    pub fn from_db_file(db_file: PathBuf) -> Self {
        let settings_file = db_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(constants::SETTINGS_FILE_NAME);
        Self {
            db_file,
            settings_file,
        }
    }
}

impl std::fmt::Display for StorePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.db_file.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_db_file() {
        let paths = StorePaths::from_db_file(PathBuf::from("/data/passwords.json"));
        assert_eq!(paths.db_file, PathBuf::from("/data/passwords.json"));
        assert_eq!(paths.settings_file, PathBuf::from("/data/settings.toml"));
    }

    #[test]
    fn test_resolve_prefers_cli_arg() {
        let paths = StorePaths::resolve(Some(PathBuf::from("/tmp/custom.json")));
        assert_eq!(paths.db_file, PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn test_relative_db_file_settings_beside_it() {
        // parent() of a bare file name is the empty path
        let paths = StorePaths::from_db_file(PathBuf::from("passwords.json"));
        assert_eq!(paths.settings_file, PathBuf::from(constants::SETTINGS_FILE_NAME));
    }
}
