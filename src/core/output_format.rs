//! Output format selection
//!
//! Three encodings are available:
//! - Json: one JSON object per line
//! - Text: space-joined `key=value` pairs
//! - Color: JSON-shaped lines with an ANSI-colored level and flattened attributes

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spellings accepted by [`OutputFormat::from_str`]
pub const ACCEPTED_FORMATS: [&str; 4] = ["json", "text", "color", "colored"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `{"time":"2025-01-08T10:30:45.123+00:00","level":"INFO","msg":"Request processed"}`
    Json,

    /// Example: `time=2025-01-08T10:30:45.123+00:00 level=INFO msg="Request processed"`
    Text,

    /// JSON-shaped line whose level value carries terminal color codes
    #[default]
    Color,
}

impl OutputFormat {
    pub fn to_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Color => "color",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            "color" | "colored" => Ok(OutputFormat::Color),
            _ => Err(LoggerError::config("format", s, ACCEPTED_FORMATS)),
        }
    }
}
