//! Opt-in JSON tracing for hosts embedding the engine.
//!
//! Built with the `trace` feature, `init_tracing` appends one JSON object
//! per event to `<log_dir>/skk-trace.jsonl`, including a close record for
//! every `handle` span so a key's processing time can be read off the log.
//! Without the feature it does nothing.

use std::io;
use std::path::{Path, PathBuf};

/// Log file created inside the host's log directory.
pub const TRACE_FILE: &str = "skk-trace.jsonl";

/// Environment variable holding `EnvFilter` directives, e.g.
/// `SKK_LOG=skk_session=trace`.
pub const FILTER_ENV: &str = "SKK_LOG";

/// Directives used when `SKK_LOG` is unset or does not parse.
pub const DEFAULT_FILTER: &str = "skk_engine=debug,skk_session=debug,skk_core=debug";

#[cfg(feature = "trace")]
static INIT: std::sync::Once = std::sync::Once::new();

/// Start writing traces. Returns the log file, or `None` when tracing is
/// compiled out. Later calls only report the path.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> io::Result<Option<PathBuf>> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir)?;
    INIT.call_once(|| {
        let appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        // the subscriber is global, so its flush guard must be too
        std::mem::forget(guard);

        let filter = EnvFilter::try_from_env(FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let installed = tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init();
        if installed.is_err() {
            // host already has a subscriber; events go there instead
            tracing::warn!("global tracing subscriber already set");
        }
    });
    Ok(Some(log_dir.join(TRACE_FILE)))
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> io::Result<Option<PathBuf>> {
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_every_crate() {
        for target in ["skk_engine", "skk_session", "skk_core"] {
            assert!(DEFAULT_FILTER.contains(&format!("{target}=debug")));
        }
    }

    #[cfg(not(feature = "trace"))]
    #[test]
    fn disabled_without_feature() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(init_tracing(dir.path()).unwrap(), None);
        assert!(!dir.path().join(TRACE_FILE).exists());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn creates_log_dir_and_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let path = init_tracing(&logs).unwrap();
        assert_eq!(path, Some(logs.join(TRACE_FILE)));
        assert!(logs.is_dir());
    }
}
