//! Configuration from the process environment
//!
//! Two modes:
//! - fixed defaults: each `LOG_*` variable overrides one field of [`Config::default`]
//! - auto-detect: `IS_SANDBOX` alone picks [`Config::development`] or [`Config::production`]

use crate::core::Config;

pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";
pub const LOG_OUTPUT: &str = "LOG_OUTPUT";
pub const LOG_ADD_SOURCE: &str = "LOG_ADD_SOURCE";
pub const LOG_TIME_FORMAT: &str = "LOG_TIME_FORMAT";
pub const LOG_TIMEZONE: &str = "LOG_TIMEZONE";
pub const SANDBOX_INDICATOR: &str = "IS_SANDBOX";

impl Config {
    /// Read the `LOG_*` variables, using the fixed defaults for unset or empty ones
    ///
    /// | Variable          | Default     |
    /// |-------------------|-------------|
    /// | `LOG_LEVEL`       | `INFO`      |
    /// | `LOG_FORMAT`      | `color`     |
    /// | `LOG_OUTPUT`      | `stdout`    |
    /// | `LOG_ADD_SOURCE`  | `true`      |
    /// | `LOG_TIME_FORMAT` | `rfc3339ms` |
    /// | `LOG_TIMEZONE`    | local time  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`Config::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Self {
            level: get_env(&lookup, LOG_LEVEL, &defaults.level),
            format: get_env(&lookup, LOG_FORMAT, &defaults.format),
            output: get_env(&lookup, LOG_OUTPUT, &defaults.output),
            add_source: get_env_bool(&lookup, LOG_ADD_SOURCE, defaults.add_source),
            time_format: get_env(&lookup, LOG_TIME_FORMAT, &defaults.time_format),
            timezone: get_env(&lookup, LOG_TIMEZONE, &defaults.timezone),
        }
    }

    /// Development preset inside a sandbox, production preset otherwise
    pub fn auto() -> Self {
        Self::auto_from_lookup(|key| std::env::var(key).ok())
    }

    /// [`Config::auto`] with a custom variable source
    pub fn auto_from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if is_sandbox(&lookup) {
            Config::development()
        } else {
            Config::production()
        }
    }
}

/// `IS_SANDBOX` counts as set unless empty, `0`, `false`, `no` or `off`
pub fn is_sandbox<F>(lookup: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(SANDBOX_INDICATOR) {
        Some(value) => {
            let value = value.trim().to_lowercase();
            !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
        }
        None => false,
    }
}

fn get_env<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Case-insensitive `true` or `1` are true; any other non-empty value is false
fn get_env_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => value.eq_ignore_ascii_case("true") || value == "1",
        _ => default,
    }
}
