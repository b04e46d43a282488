//! JSON handler for structured logging
//!
//! Writes each record as a single-line JSON object (JSONL format), compatible
//! with log aggregation tools like ELK or Loki. Attribute values keep their
//! native JSON types; maps become nested objects.

use super::{HandlerOptions, JsonLine};
use crate::core::{Handler, Record, Result, Sink};

pub struct JsonHandler {
    sink: Sink,
    options: HandlerOptions,
}

impl JsonHandler {
    pub fn new(sink: Sink, options: HandlerOptions) -> Self {
        Self { sink, options }
    }

    pub fn encode(&self, record: &Record) -> String {
        let mut line = JsonLine::new();
        line.value(
            "time",
            &self
                .options
                .time_format
                .json_value(&record.time, &self.options.timezone),
        );
        line.string("level", record.level.to_str());
        line.string("msg", &record.message);
        if let Some(source) = record.source {
            line.string("source", &source.to_string());
        }
        for attr in &record.attrs {
            line.value(&attr.key, &attr.value.to_json_value());
        }
        line.finish()
    }
}

impl Handler for JsonHandler {
    fn handle(&mut self, record: &Record) -> Result<()> {
        let line = self.encode(record);
        self.sink.write_line(&line)
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<()> {
        self.sink.close()
    }

    fn name(&self) -> &str {
        "json"
    }
}
