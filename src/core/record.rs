//! Log record passed from a logger to its handler

use super::log_level::LogLevel;
use super::value::Attr;
use chrono::{DateTime, Utc};
use std::fmt;
use std::panic::Location;

/// Call site of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    pub file: &'static str,
    pub line: u32,
}

impl Source {
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub source: Option<Source>,
    /// Group-qualified attributes: logger-bound first, then call attributes
    pub attrs: Vec<Attr>,
}

impl Record {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a message can never start a fake line of its own.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: Self::sanitize_message(message.as_ref()),
            source: None,
            attrs: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }
}
