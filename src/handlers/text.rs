//! Plain text handler
//!
//! Writes `key=value` pairs separated by spaces, `time`, `level` and `msg`
//! first. Values that contain spaces, quotes, `=` or control characters are
//! quoted.

use super::{json_quote, HandlerOptions};
use crate::core::{FieldValue, Handler, Record, Result, Sink};

pub struct TextHandler {
    sink: Sink,
    options: HandlerOptions,
}

impl TextHandler {
    pub fn new(sink: Sink, options: HandlerOptions) -> Self {
        Self { sink, options }
    }

    pub fn encode(&self, record: &Record) -> String {
        let mut parts = Vec::with_capacity(4 + record.attrs.len());

        let time = self
            .options
            .time_format
            .format(&record.time, &self.options.timezone);
        parts.push(format!("time={}", quote_if_needed(&time)));
        parts.push(format!("level={}", record.level.to_str()));
        parts.push(format!("msg={}", quote_if_needed(&record.message)));
        if let Some(source) = record.source {
            parts.push(format!("source={}", quote_if_needed(&source.to_string())));
        }

        for attr in &record.attrs {
            let value = match &attr.value {
                FieldValue::String(s) => quote_if_needed(s),
                other => quote_if_needed(&other.to_string()),
            };
            parts.push(format!("{}={}", quote_if_needed(&attr.key), value));
        }

        parts.join(" ")
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control())
}

fn quote_if_needed(s: &str) -> String {
    if needs_quoting(s) {
        json_quote(s)
    } else {
        s.to_string()
    }
}

impl Handler for TextHandler {
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
        "text"
    }
}
