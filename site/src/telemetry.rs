use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Installs the global subscriber: stdout plus a daily rolling file under
/// `log_dir`. Keep the guard alive for the life of the process or buffered
/// lines are lost.
pub fn init_tracing(cfg: &AppConfig, file_name: &str) -> Option<WorkerGuard> {
    #[cfg(feature = "tokio-console")]
    {
        if cfg.debug_console {
            console_subscriber::init();
            tracing::info!("tokio-console subscriber enabled");
            return None;
        }
    }

    if let Err(e) = std::fs::create_dir_all(&cfg.log_dir) {
        eprintln!("Cannot create log dir {}: {e}", cfg.log_dir.display());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(cfg.log_level.clone()))
            .try_init();
        return None;
    }

    let file_appender = rolling::daily(&cfg.log_dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cfg.log_level.clone()))
        .with_writer(std::io::stdout.and(file_writer))
        .try_init();

    if cfg!(not(feature = "tokio-console")) && cfg.debug_console {
        tracing::warn!("debug_console requested but built without the tokio-console feature");
    }
    Some(guard)
}
