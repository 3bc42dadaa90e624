use std::sync::Mutex;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::LogConfig;

static FILE_LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

fn keep_file_log_guard(guard: WorkerGuard) {
    if let Ok(mut slot) = FILE_LOG_GUARD.lock() {
        *slot = Some(guard);
    }
}

/// Writes out buffered file log lines and stops the file writer.
///
/// Must run before the process is replaced or exits, since neither unwinds.
pub fn flush_file_log() {
    let guard = FILE_LOG_GUARD.lock().ok().and_then(|mut slot| slot.take());
    drop(guard);
}

/// Installs the global subscriber.
///
/// Console output goes to stderr: stdout carries the launch diagnostics and
/// the children's own output.
pub fn init_logging(log_config: &LogConfig) {
    let file_layer = if log_config.file_enabled {
        log_config.dir.as_ref().map(|dir| {
            let file_appender = tracing_appender::rolling::daily(dir, "launchpad.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            keep_file_log_guard(guard);

            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_target(true)
                .boxed()
        })
    } else {
        None
    };

    let console_layer = match log_config.console_format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .boxed(),
        "pretty" => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        _ => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .boxed(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_config.filter_directive()));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer);

    if let Some(file_layer) = file_layer {
        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }
}
