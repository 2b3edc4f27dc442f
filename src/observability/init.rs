//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported span.
pub const SERVICE_NAME: &str = "marquee";

/// Keeps span export alive; dropping it flushes and shuts the exporter down.
#[derive(Debug, Default)]
pub struct TracingGuard {
    provider: Option<TracerProvider>,
}

impl TracingGuard {
    /// Whether spans are being exported to a file.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(error) = provider.shutdown() {
                eprintln!("marquee: span export shutdown failed: {error}");
            }
        }
    }
}

/// Installs the global subscriber.
///
/// The pipeline is:
/// 1. `EnvFilter` from `RUST_LOG`, else `config.trace_level`, else `"info"`
/// 2. A human-readable layer on stderr
/// 3. When `config.trace_file` is set, an OpenTelemetry layer exporting
///    finished spans as JSON lines to that file (size-rotated)
///
/// Calling it again is harmless: only the first subscriber is installed.
///
/// # Example
///
/// ```rust,no_run
/// use marquee::observability::init_tracing;
/// use marquee::Config;
///
/// let _guard = init_tracing(&Config::default());
/// tracing::debug!("tracing is now active");
/// ```
#[must_use]
pub fn init_tracing(config: &Config) -> TracingGuard {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let provider = config.trace_file.as_ref().map(|path| {
        let resource = Resource::new(vec![opentelemetry::KeyValue::new(
            "service.name",
            SERVICE_NAME,
        )]);
        exporter::create_tracer_provider(path.clone(), resource)
    });
    let otel_layer = provider
        .as_ref()
        .map(|provider| OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    if let Err(error) = installed {
        tracing::debug!(error = %error, "tracing subscriber already installed");
        return TracingGuard::default();
    }

    if let Some(path) = &config.trace_file {
        tracing::debug!(trace_file = %path.display(), "exporting spans");
    }
    TracingGuard { provider }
}
