//! Command line and file locations.

use super::errors::{AppError, AppResult};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::path::PathBuf;

const DATA_FILE_NAME: &str = "store.json";
const LOG_FILE_NAME: &str = "tinvoice.log";

#[derive(Debug, Parser)]
#[command(name = "tinvoice", version, about = "Terminal invoicing: contacts and sender details")]
pub struct Cli {
    /// Data file holding contacts and the invoice draft
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Log file (filter with RUST_LOG)
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Import contacts from a CSV file (id,name,address,gst)
    Import { path: PathBuf },
    /// Export contacts to a CSV file
    Export { path: PathBuf },
}

/// Resolved locations the application works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
}

impl Settings {
    /// Explicit paths win; anything else goes to the platform data
    /// directory.
    pub fn resolve(cli: &Cli) -> AppResult<Self> {
        let data_dir = match (&cli.data, &cli.log) {
            (Some(_), Some(_)) => None,
            _ => Some(default_data_dir()?),
        };
        let in_data_dir = |name: &str| -> PathBuf {
            data_dir.as_deref().map(|dir| dir.join(name)).unwrap_or_else(|| PathBuf::from(name))
        };

        Ok(Self {
            data_file: cli.data.clone().unwrap_or_else(|| in_data_dir(DATA_FILE_NAME)),
            log_file: cli.log.clone().unwrap_or_else(|| in_data_dir(LOG_FILE_NAME)),
        })
    }
}

fn default_data_dir() -> AppResult<PathBuf> {
    ProjectDirs::from("", "", "tinvoice")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AppError::Config("could not determine a home directory".to_string()))
}
