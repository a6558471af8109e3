use std::io::{self, Write};
use std::path::PathBuf;

use indicatif::ProgressBar;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directory for a debug log file, unset means stderr only
pub const LOG_DIR_ENV: &str = "OPGAVER_LOG_DIR";

const LOG_FILE: &str = "opgaver.log";

const FILE_LOG_FILTER: &str = "opgaver_core=debug,opgaver_cli=debug";

/// Stderr writer that clears the progress bar while a log line is written
/// and redraws it afterwards.
pub struct SuspendingStderr(ProgressBar);

impl Write for SuspendingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Initialize the tracing subscriber for logging.
///
/// Stderr output goes around `bar`. The returned guard flushes the log file
/// when dropped, so it has to live until `main` returns.
pub fn init_tracing(bar: ProgressBar) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control the stderr level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer()
        .with_writer(move || SuspendingStderr(bar.clone()))
        .with_filter(filter);

    let (file_layer, guard) = match std::env::var_os(LOG_DIR_ENV).map(PathBuf::from) {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new(FILE_LOG_FILTER));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
