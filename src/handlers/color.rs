//! Colorized handler
//!
//! Produces JSON-shaped lines for terminals: the `level` value is wrapped in
//! an ANSI color sequence and every attribute is flattened into dotted
//! string-valued keys. Run a line through [`strip_ansi`] before feeding it to a
//! JSON parser.

use super::{HandlerOptions, JsonLine};
use crate::core::{flatten_into, FieldValue, Handler, LogLevel, Record, Result, Sink};

const RESET: &str = "\x1b[0m";

/// Handler for the colorized format
///
/// The painted level embeds raw ESC bytes in a JSON string, which strict
/// parsers reject. Lines become valid JSON once passed through [`strip_ansi`].
pub struct ColorHandler {
    sink: Sink,
    options: HandlerOptions,
}

impl ColorHandler {
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
        line.raw_string("level", &paint_level(record.level.to_str()));
        line.string("msg", &record.message);
        if let Some(source) = record.source {
            line.string("source", &source.to_string());
        }

        let mut flat = Vec::with_capacity(record.attrs.len());
        for attr in &record.attrs {
            flatten_into(&attr.key, &attr.value, &mut flat);
        }
        for attr in &flat {
            match &attr.value {
                FieldValue::String(s) => line.string(&attr.key, s),
                other => line.value(&attr.key, &other.to_json_value()),
            }
        }

        line.finish()
    }
}

/// Wrap a level name in its terminal color; unknown names stay uncolored
pub fn paint_level(name: &str) -> String {
    match name.parse::<LogLevel>() {
        Ok(level) => format!("\x1b[{}m{}{}", level.color_code().to_fg_str(), name, RESET),
        Err(_) => name.to_string(),
    }
}

/// Remove ANSI SGR sequences (`ESC [ ... m`) from `s`
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

impl Handler for ColorHandler {
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
        "color"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Attr, Source, TimestampFormat, Timezone};

    fn handler() -> ColorHandler {
        ColorHandler::new(
            Sink::stderr(),
            HandlerOptions::new(TimestampFormat::TimeMillis, Timezone::Utc),
        )
    }

    fn decode(line: &str) -> serde_json::Value {
        serde_json::from_str(&strip_ansi(line)).expect("colorized line is JSON once stripped")
    }

    #[test]
    fn test_level_is_colored() {
        let line = handler().encode(&Record::new(LogLevel::Error, "boom"));
        assert!(line.contains("\"level\":\"\x1b[31mERROR\x1b[0m\""));
        assert_eq!(decode(&line)["level"], "ERROR");
    }

    #[test]
    fn test_each_level_has_its_own_color() {
        assert_eq!(paint_level("DEBUG"), "\x1b[34mDEBUG\x1b[0m");
        assert_eq!(paint_level("INFO"), "\x1b[32mINFO\x1b[0m");
        assert_eq!(paint_level("WARN"), "\x1b[33mWARN\x1b[0m");
        assert_eq!(paint_level("ERROR"), "\x1b[31mERROR\x1b[0m");
    }

    #[test]
    fn test_unknown_level_is_plain() {
        assert_eq!(paint_level("TRACE"), "TRACE");
    }

    #[test]
    fn test_json_string_attribute_is_flattened() {
        let record = Record::new(LogLevel::Info, "request")
            .with_attrs([Attr::new("body", r#"{"user":"alice","age":30}"#)]);
        let parsed = decode(&handler().encode(&record));

        assert_eq!(parsed["body.user"], "alice");
        assert_eq!(parsed["body.age"], "30");
        assert!(parsed.get("body").is_none());
    }

    #[test]
    fn test_scalars_and_null() {
        let record = Record::new(LogLevel::Info, "m").with_attrs([
            Attr::new("count", 3),
            Attr::new("ok", true),
            Attr::new("missing", None::<String>),
        ]);
        let parsed = decode(&handler().encode(&record));

        assert_eq!(parsed["count"], "3");
        assert_eq!(parsed["ok"], "true");
        assert!(parsed["missing"].is_null());
        assert!(parsed.as_object().unwrap().contains_key("missing"));
    }

    #[test]
    fn test_source_and_time() {
        let record = Record::new(LogLevel::Debug, "m").with_source(Source {
            file: "src/lib.rs",
            line: 7,
        });
        let parsed = decode(&handler().encode(&record));

        assert_eq!(parsed["source"], "src/lib.rs:7");
        // %H:%M:%S%.3f
        assert_eq!(parsed["time"].as_str().unwrap().len(), 12);
    }

    #[test]
    fn test_unstripped_line_is_not_strict_json() {
        let line = handler().encode(&Record::new(LogLevel::Info, "m"));
        assert!(serde_json::from_str::<serde_json::Value>(&line).is_err());
        assert!(serde_json::from_str::<serde_json::Value>(&strip_ansi(&line)).is_ok());
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[1;31mred\x1b[0m text"), "red text");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
