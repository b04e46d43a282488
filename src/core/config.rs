//! Logger configuration and validation

use super::error::Result;
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::sink::Output;
use super::timestamp::{TimestampFormat, Timezone};
use serde::{Deserialize, Serialize};

/// Logger configuration
///
/// Fields hold the raw strings a user or environment supplied; [`Config::validate`]
/// checks them before any logger is built. Defaults match the fixed-default
/// environment table: INFO, colorized, stdout, source locations on, `rfc3339ms`.
///
/// # Example
///
/// ```
/// use logfacade::Config;
///
/// let cfg = Config::new().with_level("warning").with_format("json");
/// assert!(cfg.validate().is_ok());
///
/// let bad = Config::new().with_level("TRACE");
/// assert!(bad.validate().unwrap_err().to_string().contains("TRACE"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// DEBUG, INFO, WARN (or WARNING), ERROR; case-insensitive
    pub level: String,
    /// json, text, color (or colored)
    pub format: String,
    /// stdout, stderr, or a file path opened for append
    pub output: String,
    pub add_source: bool,
    /// time, timems, datetime, rfc3339, rfc3339ms, unix, unixms, unixfloat or a strftime pattern
    pub time_format: String,
    /// Empty for local time, `UTC`, or a fixed offset such as `+08:00` or `UTC+8`
    ///
    /// Only offsets are accepted; zone names like `Asia/Shanghai` fall back
    /// to local time with a warning.
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            format: "color".to_string(),
            output: "stdout".to_string(),
            add_source: true,
            time_format: "rfc3339ms".to_string(),
            timezone: String::new(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for local development: DEBUG, colorized, source locations, `time`
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "DEBUG".to_string(),
            format: "color".to_string(),
            add_source: true,
            time_format: "time".to_string(),
            ..Self::default()
        }
    }

    /// Preset for deployed services: INFO, JSON, no source locations, `datetime`
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "INFO".to_string(),
            format: "json".to_string(),
            add_source: false,
            time_format: "datetime".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    #[must_use]
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = time_format.into();
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Check level and format against their accepted values
    ///
    /// The error names the field, the rejected value and every accepted value.
    pub fn validate(&self) -> Result<()> {
        self.log_level()?;
        self.output_format()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel> {
        self.level.parse()
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format.parse()
    }

    pub fn output_target(&self) -> Output {
        Output::parse(&self.output)
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        match self.time_format.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }

    /// Resolved timezone; unparseable names fall back to local time
    pub fn tz(&self) -> Timezone {
        Timezone::resolve(&self.timezone)
    }
}
