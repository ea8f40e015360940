//! Logging setup
//!
//! Console logging goes through the `log` macros and `env_logger`. The
//! `Logger` type additionally keeps an operation log file recording what
//! each command produced.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use log::LevelFilter;

/// Operation log written alongside console output
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a new logger appending to `log_file`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be opened
    pub fn new<P: AsRef<Path>>(log_file: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file.as_ref())?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// A logger that discards everything
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Logs a timestamped message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;

        if let Some(file) = guard.as_mut() {
            writeln!(file, "{} {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Initialize console logging for the `log` macros
    ///
    /// Messages are printed as `LEVEL   - message`. `RUST_LOG` overrides
    /// the level chosen here.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Show debug messages
    pub fn init_global_logger(verbose: bool) {
        let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

        let result = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format(|buf, record| writeln!(buf, "{:<7} - {}", record.level(), record.args()))
            .try_init();

        if result.is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }
    }
}
