use color_eyre::owo_colors::OwoColorize;
use std::fmt;
use tracing::Subscriber;
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::Layer, layer::SubscriberExt};

/// `RUST_LOG` takes precedence over `env_filter` when it is set.
pub fn get_subscriber(env_filter: &str) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    Registry::default()
        .with(env_filter)
        .with(
            Layer::new()
                .compact()
                .with_ansi(true)
                .with_timer(ClockTimer)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE),
        )
        .with(ErrorLayer::default())
}

/// # Errors
/// Fails if a logger or a global subscriber was already installed.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> eyre::Result<()> {
    LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[derive(Debug, Default, Clone, Copy)]
struct ClockTimer;

impl tracing_subscriber::fmt::time::FormatTime for ClockTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let datetime = chrono::Local::now().format("%H:%M:%S");
        write!(w, "{}", datetime.bright_blue())
    }
}
