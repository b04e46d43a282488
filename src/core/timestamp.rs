//! Timestamp formatting utilities
//!
//! Provides the named timestamp presets accepted in configuration, custom
//! strftime patterns, and timezone resolution for rendering.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use logfacade::core::{TimestampFormat, Timezone};
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// let format: TimestampFormat = "datetime".parse().unwrap();
/// assert_eq!(format.format(&dt, &Timezone::Utc), "2025-01-08 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Time of day: `10:30:45`
    Time,

    /// Time of day with milliseconds: `10:30:45.123`
    TimeMillis,

    /// Date and time without zone: `2025-01-08 10:30:45`
    DateTime,

    /// RFC 3339: `2025-01-08T10:30:45Z`
    Rfc3339,

    /// RFC 3339 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Rfc3339Millis,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in seconds with microsecond fraction: `1736332245.123456`
    UnixFloat,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use logfacade::core::TimestampFormat;
    ///
    /// // Apache log format
    /// let format: TimestampFormat = "%d/%b/%Y:%H:%M:%S %z".parse().unwrap();
    /// assert!(matches!(format, TimestampFormat::Custom(_)));
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Render `datetime` in the given timezone
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>, timezone: &Timezone) -> String {
        match timezone {
            Timezone::Utc => self.format_in(datetime),
            Timezone::Local => self.format_in(&datetime.with_timezone(&Local)),
            Timezone::Fixed(offset) => self.format_in(&datetime.with_timezone(offset)),
        }
    }

    fn format_in<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Time => datetime.format("%H:%M:%S").to_string(),
            TimestampFormat::TimeMillis => datetime.format("%H:%M:%S%.3f").to_string(),
            TimestampFormat::DateTime => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Rfc3339Millis => datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixFloat => format!(
                "{}.{:06}",
                datetime.timestamp(),
                datetime.timestamp_subsec_micros()
            ),
            TimestampFormat::Custom(pattern) => {
                // chrono reports bad specifiers as a fmt error, which to_string() would panic on
                let mut out = String::new();
                if write!(out, "{}", datetime.format(pattern)).is_err() {
                    return datetime.to_rfc3339_opts(SecondsFormat::Millis, true);
                }
                out
            }
        }
    }

    /// JSON value for the `time` key; numeric presets stay numbers
    pub fn json_value(&self, datetime: &DateTime<Utc>, timezone: &Timezone) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => serde_json::Value::from(datetime.timestamp()),
            TimestampFormat::UnixMillis => serde_json::Value::from(datetime.timestamp_millis()),
            TimestampFormat::UnixFloat => {
                let secs = datetime.timestamp() as f64
                    + f64::from(datetime.timestamp_subsec_micros()) / 1_000_000.0;
                serde_json::Value::from(secs)
            }
            _ => serde_json::Value::String(self.format(datetime, timezone)),
        }
    }

}

impl FromStr for TimestampFormat {
    type Err = Infallible;

    /// Named presets match case-insensitively; anything else is a strftime pattern
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "" | "rfc3339ms" => TimestampFormat::Rfc3339Millis,
            "time" => TimestampFormat::Time,
            "timems" => TimestampFormat::TimeMillis,
            "datetime" => TimestampFormat::DateTime,
            "rfc3339" => TimestampFormat::Rfc3339,
            "unix" => TimestampFormat::Unix,
            "unixms" => TimestampFormat::UnixMillis,
            "unixfloat" => TimestampFormat::UnixFloat,
            _ => TimestampFormat::Custom(s.to_string()),
        })
    }
}

/// Timezone used when rendering timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timezone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Timezone {
    /// Parse a timezone name or offset
    ///
    /// Accepts `local`, `utc`/`z`, and offsets such as `+08:00`, `-0530`,
    /// `UTC+8` or `GMT-05:30`. Empty input means local time. Zone database
    /// names such as `Asia/Shanghai` are not recognized.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let upper = s.to_uppercase();
        match upper.as_str() {
            "" | "LOCAL" => return Some(Timezone::Local),
            "UTC" | "Z" | "GMT" => return Some(Timezone::Utc),
            _ => {}
        }

        let offset = upper
            .strip_prefix("UTC")
            .or_else(|| upper.strip_prefix("GMT"))
            .unwrap_or(&upper);
        parse_offset(offset).map(Timezone::Fixed)
    }

    /// Like [`Timezone::parse`], falling back to local time on bad input
    pub fn resolve(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            eprintln!(
                "[LOGGER WARNING] Unrecognized timezone '{}', using local time",
                s
            );
            Timezone::Local
        })
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    // byte-index splitting below needs ASCII
    if !rest.is_ascii() {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() > 2 => rest.split_at(rest.len() - 2),
        None => (rest, "0"),
    };
    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
