//! OpenTelemetry span exporter writing one JSON object per span.
//!
//! Each finished span becomes a single line in the rotating export file:
//!
//! ```text
//! {"service":"marquee","trace_id":"…","span_id":"…","parent_span_id":null,
//!  "name":"handle_event","start_unix_nanos":…,"duration_micros":412,
//!  "attributes":{"event_type":"ShowHome(None)"},"events":[…],"status":"unset"}
//! ```

use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub struct JsonLinesExporter {
    writer: RotatingFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    #[must_use]
    pub fn new(writer: RotatingFile, resource: &Resource) -> Self {
        let service = resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map_or_else(|| "unknown".to_string(), |v| v.to_string());
        Self {
            writer,
            service,
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Serializes one span into its export record.
    #[must_use]
    pub fn record(&self, span: &SpanData) -> JsonValue {
        let parent = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or(Duration::ZERO);

        let mut record = json!({
            "service": self.service,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_span_id": parent,
            "name": span.name,
            "start_unix_nanos": unix_nanos(span.start_time),
            "duration_micros": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            "attributes": attributes(&span.attributes),
            "events": span.events.iter().map(|event| json!({
                "name": event.name,
                "time_unix_nanos": unix_nanos(event.timestamp),
                "attributes": attributes(&event.attributes),
            })).collect::<Vec<_>>(),
        });

        let (status, message) = match &span.status {
            Status::Unset => ("unset", None),
            Status::Ok => ("ok", None),
            Status::Error { description } => ("error", Some(description.to_string())),
        };
        record["status"] = json!(status);
        if let Some(message) = message {
            record["status_message"] = json!(message);
        }
        record
    }
}

fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

fn attributes(pairs: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = pairs
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = batch
            .iter()
            .try_for_each(|span| self.writer.write_line(&self.record(span).to_string()))
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("writer", &self.writer)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a provider exporting every finished span to `path` immediately.
#[must_use]
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter::new(RotatingFile::new(path), &resource);

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_keep_json_types() {
        let attrs = attributes(&[
            KeyValue::new("ok", true),
            KeyValue::new("count", 3_i64),
            KeyValue::new("term", "matrix"),
        ]);
        assert_eq!(attrs, json!({ "ok": true, "count": 3, "term": "matrix" }));
    }

    #[test]
    fn service_name_comes_from_resource() {
        let dir = tempfile::tempdir().unwrap();
        let resource = Resource::new(vec![KeyValue::new("service.name", "marquee")]);
        let exporter =
            JsonLinesExporter::new(RotatingFile::new(dir.path().join("spans.jsonl")), &resource);
        assert_eq!(exporter.service, "marquee");
    }

    #[test]
    fn exported_spans_land_in_file() {
        use opentelemetry::trace::{Tracer, TracerProvider as _};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let resource = Resource::new(vec![KeyValue::new("service.name", "marquee")]);
        let provider = create_tracer_provider(path.clone(), resource);

        provider.tracer("test").in_span("load_home", |_cx| {});
        drop(provider);

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().expect("one span exported");
        let record: JsonValue = serde_json::from_str(line).unwrap();
        assert_eq!(record["name"], "load_home");
        assert_eq!(record["service"], "marquee");
        assert_eq!(record["parent_span_id"], JsonValue::Null);
    }
}
