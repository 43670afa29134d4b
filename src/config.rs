//! Runtime configuration resolved from the command line and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{default_log_level, Cli};
use crate::db::STORAGE_KEY;
use crate::error::AppError;

/// Name of the per-user data directory under `$HOME`.
pub const DATA_DIR_NAME: &str = ".kanban";
pub const LOG_FILE_NAME: &str = "kanban.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the board snapshot.
    pub db_path: PathBuf,
    /// Where the board UI sends its logs.
    pub log_path: PathBuf,
    pub log_level: &'static str,
}

impl Config {
    /// Work out file locations and create the data directory if needed.
    pub fn resolve(cli: &Cli) -> Result<Self, AppError> {
        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => {
                let home = dirs::home_dir().ok_or(AppError::NoHome)?;
                home.join(DATA_DIR_NAME).join(format!("{STORAGE_KEY}.json"))
            }
        };
        let config = Self::for_db(db_path, default_log_level(cli.verbose, cli.quiet));
        config.ensure_data_dir()?;
        Ok(config)
    }

    fn for_db(db_path: PathBuf, log_level: &'static str) -> Self {
        let log_path = data_dir_of(&db_path).join(LOG_FILE_NAME);
        Config {
            db_path,
            log_path,
            log_level,
        }
    }

    pub fn data_dir(&self) -> &Path {
        data_dir_of(&self.db_path)
    }

    fn ensure_data_dir(&self) -> Result<(), AppError> {
        let dir = self.data_dir();
        fs::create_dir_all(dir).map_err(|source| AppError::DataDir {
            path: dir.to_path_buf(),
            source,
        })
    }
}

fn data_dir_of(db_path: &Path) -> &Path {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
