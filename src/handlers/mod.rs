//! Handler implementations, one per output format

pub mod color;
pub mod json;
pub mod text;

pub use color::{paint_level, strip_ansi, ColorHandler};
pub use json::JsonHandler;
pub use text::TextHandler;

pub use crate::core::Handler;

use crate::core::{OutputFormat, Sink, TimestampFormat, Timezone};

/// Rendering options shared by all handlers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerOptions {
    pub time_format: TimestampFormat,
    pub timezone: Timezone,
}

impl HandlerOptions {
    pub fn new(time_format: TimestampFormat, timezone: Timezone) -> Self {
        Self {
            time_format,
            timezone,
        }
    }
}

/// Build the handler for `format` writing to `sink`
pub fn for_format(format: OutputFormat, sink: Sink, options: HandlerOptions) -> Box<dyn Handler> {
    match format {
        OutputFormat::Json => Box::new(JsonHandler::new(sink, options)),
        OutputFormat::Text => Box::new(TextHandler::new(sink, options)),
        OutputFormat::Color => Box::new(ColorHandler::new(sink, options)),
    }
}

/// Quote `s` as a JSON string literal
pub(crate) fn json_quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

/// Incremental writer for one JSON object line, keeping keys in insertion order
/// and allowing duplicate keys
pub(crate) struct JsonLine {
    buf: String,
    empty: bool,
}

impl JsonLine {
    pub(crate) fn new() -> Self {
        let mut buf = String::with_capacity(256);
        buf.push('{');
        Self { buf, empty: true }
    }

    fn key(&mut self, key: &str) {
        if !self.empty {
            self.buf.push(',');
        }
        self.empty = false;
        self.buf.push_str(&json_quote(key));
        self.buf.push(':');
    }

    pub(crate) fn string(&mut self, key: &str, value: &str) {
        self.key(key);
        self.buf.push_str(&json_quote(value));
    }

    pub(crate) fn value(&mut self, key: &str, value: &serde_json::Value) {
        self.key(key);
        self.buf.push_str(&value.to_string());
    }

    /// Write `value` verbatim between quotes, without escaping
    pub(crate) fn raw_string(&mut self, key: &str, value: &str) {
        self.key(key);
        self.buf.push('"');
        self.buf.push_str(value);
        self.buf.push('"');
    }

    pub(crate) fn finish(mut self) -> String {
        self.buf.push('}');
        self.buf
    }
}
