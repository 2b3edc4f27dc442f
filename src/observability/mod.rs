//! Structured logging and optional OpenTelemetry span export.
//!
//! ```text
//! tracing macros → EnvFilter → stderr fmt layer
//!                            → tracing-opentelemetry → SDK → JsonLinesExporter → rotating file
//! ```
//!
//! # Configuration
//!
//! Verbosity comes from:
//! 1. `RUST_LOG` (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! Span export is off unless `trace_file` is set.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup and the shutdown guard
//! - [`exporter`]: JSON-lines `SpanExporter` and tracer provider
//! - [`rotation`]: Size-rotated file writer with numbered backups

pub mod exporter;
pub mod init;
pub mod rotation;

pub use init::{init_tracing, TracingGuard, SERVICE_NAME};
