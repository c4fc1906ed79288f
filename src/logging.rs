//! Console and file logging for one run.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::dispatcher::DefaultGuard;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging settings taken from the command line.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// File to append log lines to.
    pub file: PathBuf,
    /// Log at debug level instead of info.
    pub verbose: bool,
}

/// Active logging for the current thread; dropping it tears logging down.
pub struct Logging {
    file: Option<PathBuf>,
    _guard: DefaultGuard,
}

impl Logging {
    /// The log file in use, if it could be opened.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

/// Install console and file logging.
///
/// `RUST_LOG` overrides the level. If the log file cannot be opened, logging
/// continues on the console only and a warning says so.
#[must_use]
pub fn init(options: &LogOptions) -> Logging {
    let default_level = if options.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    install(options, filter)
}

fn install(options: &LogOptions, filter: EnvFilter) -> Logging {
    let (file_layer, open_error) = match open_log_file(&options.file) {
        Ok(f) => (Some(fmt::layer().with_ansi(false).with_target(false).with_writer(Mutex::new(f))), None),
        Err(e) => (None, Some(e)),
    };

    let guard = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .set_default();

    let file = match open_error {
        None => Some(options.file.clone()),
        Some(e) => {
            warn!(path = %options.file.display(), error = %e, "cannot open log file, logging to console only");
            None
        }
    };

    Logging { file, _guard: guard }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
