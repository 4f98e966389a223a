use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Without a log directory, warnings go to stderr. With one, debug-level JSON
/// lines go to `<log_dir>/lexidex-trace.jsonl`; keep the returned guard alive
/// until exit so buffered lines are flushed. `RUST_LOG` overrides either
/// default filter.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let mut worker = None;
    INIT.call_once(|| match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "lexidex-trace.jsonl");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            worker = Some(guard);

            tracing_subscriber::fmt()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                .with_env_filter(env_filter("lexidex_core=debug,lexidex_cli=debug"))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter("warn"))
                .init();
        }
    });
    worker
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
