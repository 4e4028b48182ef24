//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Output format for the global subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Initialize compact tracing output. Safe to call multiple times.
pub fn init() {
    init_with(LogFormat::Compact);
}

/// Initialize tracing with the given format. Only the first call has effect.
///
/// `RUST_LOG` directives are honored. Under a test harness the subscriber
/// writes through the test writer at DEBUG so output is captured per test.
pub fn init_with(format: LogFormat) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);

        let result = match (format, is_test) {
            (LogFormat::Compact, true) => {
                builder.compact().with_test_writer().finish().try_init()
            }
            (LogFormat::Compact, false) => {
                builder.compact().with_writer(std::io::stderr).finish().try_init()
            }
            (LogFormat::Json, true) => builder.json().with_test_writer().finish().try_init(),
            (LogFormat::Json, false) => {
                builder.json().with_writer(std::io::stderr).finish().try_init()
            }
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e)
        }
    });
}
