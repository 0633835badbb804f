use crate::logging::consts::{DEFAULT_LOGGING_BUFFER_SIZE, QUICKWIT_LOGGING_CHANNEL_CAPACITY};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use tokio::sync::mpsc;
use tokio::task;
use tracing::field::{Field, Visit};
use tracing_core::Event;
use tracing_core::Subscriber;
use tracing_subscriber::layer::Context as TracingContext;
use tracing_subscriber::Layer;
use url::Url;

pub struct QuickwitLoggingLayerBuilder {
    quickwit_url: Url,
    target_field: String,
    field_to_index: HashMap<String, String>,
    batch_size: usize,
}

impl QuickwitLoggingLayerBuilder {
    pub fn new(quickwit_url: Url) -> Self {
        Self {
            quickwit_url,
            target_field: String::new(),
            field_to_index: HashMap::new(),
            batch_size: DEFAULT_LOGGING_BUFFER_SIZE,
        }
    }

    pub fn marker_field(mut self, field: &str) -> Self {
        self.target_field = field.to_string();
        self
    }

    pub fn map_marker_to_index(mut self, field_value: &str, index_id: &str) -> Self {
        self.field_to_index
            .insert(field_value.to_string(), index_id.to_string());
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn build(self) -> QuickwitLoggingLayer {
        QuickwitLoggingLayer::new(
            self.target_field,
            self.field_to_index,
            self.quickwit_url,
            self.batch_size,
        )
    }
}

pub struct QuickwitLoggingLayer {
    sender: mpsc::Sender<QuickwitLogMessage>,
    target_field: String,
    field_to_index: HashMap<String, String>,
}

impl QuickwitLoggingLayer {
    fn new(
        target_field: String,
        field_to_index: HashMap<String, String>,
        quickwit_url: Url,
        batch_size: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(QUICKWIT_LOGGING_CHANNEL_CAPACITY);
        let index_names = field_to_index.values().cloned().collect::<Vec<_>>();
        QuickwitLoggingTask::spawn(quickwit_url, receiver, batch_size, index_names);
        Self {
            sender,
            target_field,
            field_to_index,
        }
    }

    fn index_of(&self, event: &Event<'_>) -> Option<String> {
        let mut visitor = TargetFieldVisitor::new(&self.target_field);
        event.record(&mut visitor);
        visitor
            .target_value
            .and_then(|value| self.field_to_index.get(&value).cloned())
    }
}

impl<S: Subscriber> Layer<S> for QuickwitLoggingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: TracingContext<'_, S>) {
        if let Some(index_id) = self.index_of(event) {
            let mut visitor = LogVisitor::new();
            event.record(&mut visitor);
            let log_message = QuickwitLogMessage {
                index_id,
                log: visitor.log,
            };
            // A full channel drops the log rather than blocking the request.
            let _ = self.sender.try_send(log_message);
        }
    }
}

struct QuickwitLoggingTask {
    http_client: Client,
    quickwit_url: Url,
    buffers: HashMap<String, Vec<serde_json::Map<String, serde_json::Value>>>,
    batch_size: usize,
}

impl QuickwitLoggingTask {
    fn spawn(
        quickwit_url: Url,
        mut receiver: mpsc::Receiver<QuickwitLogMessage>,
        batch_size: usize,
        index_names: Vec<String>,
    ) {
        let buffers = index_names
            .into_iter()
            .map(|index_name| (index_name, Vec::with_capacity(batch_size)))
            .collect();
        let mut logging_task = Self {
            http_client: Client::new(),
            quickwit_url,
            buffers,
            batch_size,
        };
        task::spawn(async move {
            while let Some(QuickwitLogMessage { index_id, log }) = receiver.recv().await {
                let Some(buffer) = logging_task.buffers.get_mut(&index_id) else {
                    continue;
                };
                buffer.push(log);
                if buffer.len() >= logging_task.batch_size {
                    logging_task.flush(&index_id).await;
                }
            }
            let index_ids = logging_task.buffers.keys().cloned().collect::<Vec<_>>();
            for index_id in index_ids {
                logging_task.flush(&index_id).await;
            }
        });
    }

    // Logging from here would feed back into the layer, so failures go to stderr.
    async fn flush(&mut self, index_id: &str) {
        let Some(buffer) = self.buffers.get_mut(index_id) else {
            return;
        };
        if buffer.is_empty() {
            return;
        }
        let mut ndjson_body = Vec::new();
        for log in buffer.drain(..) {
            if let Err(err) = serialize_to_ndjson(&mut ndjson_body, &log) {
                eprintln!("Failed to serialize a log for Quickwit: {err}");
            }
        }
        let ingest_url = match ingest_url(&self.quickwit_url, index_id) {
            Ok(ingest_url) => ingest_url,
            Err(err) => {
                eprintln!("Invalid Quickwit ingest URL for `{index_id}`: {err}");
                return;
            }
        };
        if let Err(err) = self
            .http_client
            .post(ingest_url)
            .body(ndjson_body)
            .send()
            .await
        {
            eprintln!("Failed to ship logs to Quickwit index `{index_id}`: {err}");
        }
    }
}

pub fn ingest_url(quickwit_url: &Url, index_id: &str) -> Result<Url, url::ParseError> {
    quickwit_url.join(&format!("api/v1/{index_id}/ingest"))
}

struct TargetFieldVisitor {
    target_field: String,
    target_value: Option<String>,
}

impl TargetFieldVisitor {
    fn new(target_field: &str) -> Self {
        Self {
            target_field: target_field.to_string(),
            target_value: None,
        }
    }
}

impl Visit for TargetFieldVisitor {
    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.target_field {
            self.target_value = Some(value.to_string());
        }
    }
}

struct LogVisitor {
    log: serde_json::Map<String, serde_json::Value>,
}

impl LogVisitor {
    fn new() -> Self {
        Self {
            log: serde_json::Map::new(),
        }
    }
}

impl Visit for LogVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.log.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.log.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.log.insert(field.name().to_string(), value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.log.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.log.insert(field.name().to_string(), value.into());
    }

    // Quickwit has no 128-bit integers.
    fn record_u128(&mut self, field: &Field, value: u128) {
        let value = u64::try_from(value).unwrap_or(u64::MAX);
        self.log.insert(field.name().to_string(), value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.log
            .insert(field.name().to_string(), format!("{:?}", value).into());
    }
}

#[derive(Debug, Serialize)]
struct QuickwitLogMessage {
    index_id: String,
    log: serde_json::Map<String, serde_json::Value>,
}

fn serialize_to_ndjson<W, V>(mut writer: W, value: &V) -> io::Result<()>
where
    W: io::Write,
    V: ?Sized + Serialize,
{
    serde_json::to_writer(&mut writer, value)?;
    writer.write_all(b"\n")
}
