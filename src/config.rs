use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::SortOrder;
use crate::Error;

/// Tic-tac-toe with a move history you can step back through.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Config {
    /// Append log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives, e.g. `replaytty=debug` (defaults to RUST_LOG, then `info`)
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Initial order of the move list
    #[arg(long, value_enum, default_value_t = SortOrder::Ascending)]
    pub order: SortOrder,
}

impl Config {
    fn env_filter(&self) -> Result<EnvFilter, Error> {
        match &self.log_filter {
            Some(directives) => {
                EnvFilter::try_new(directives).map_err(|e| Error::Logging(e.to_string()))
            }
            None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
        }
    }

    /// Installs the global subscriber.
    ///
    /// Logs go to `--log-file` when set. Otherwise they go to stderr, unless
    /// `stderr_allowed` is false (full-screen mode), in which case nothing is
    /// installed.
    pub fn init_logging(&self, stderr_allowed: bool) -> Result<(), Error> {
        let filter = self.env_filter()?;

        let result = match &self.log_file {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .try_init()
            }
            None if stderr_allowed => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init(),
            None => return Ok(()),
        };
        result.map_err(|e| Error::Logging(e.to_string()))
    }
}
