//! Convenience helpers for common logging patterns

use crate::context::{from_context, Context};
use crate::core::Attr;
use crate::global::default_logger;
use std::error::Error;

/// Format a byte count with binary units: `1536` → `"1.5 KB"`
///
/// ```
/// use logfacade::format_bytes;
///
/// assert_eq!(format_bytes(1023), "1023 B");
/// assert_eq!(format_bytes(1536 * 1024), "1.5 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{} B", bytes);
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!("{:.1} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}

/// Error returned by [`log_and_wrap`]: the message followed by its cause
#[derive(Debug, thiserror::Error)]
#[error("{message}: {source}")]
pub struct WrappedError {
    pub message: String,
    #[source]
    pub source: Box<dyn Error + Send + Sync + 'static>,
}

/// Log `err` at ERROR through the context's logger and hand it back
///
/// ```
/// use logfacade::{log_error, Attr, Context};
///
/// fn load(ctx: &Context) -> Result<(), std::io::Error> {
///     let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
///     Err(log_error(ctx, "loading config failed", err, [Attr::new("attempt", 1)]))
/// }
/// assert!(load(&Context::background()).is_err());
/// ```
#[track_caller]
pub fn log_error<E>(
    ctx: &Context,
    message: &str,
    err: E,
    attrs: impl IntoIterator<Item = Attr>,
) -> E
where
    E: Error,
{
    let logger = from_context(ctx);
    logger.error(message, std::iter::once(Attr::error(&err)).chain(attrs));
    err
}

/// Log `err` at ERROR through the default logger and wrap it with `message`
#[track_caller]
pub fn log_and_wrap<E>(
    message: impl Into<String>,
    err: E,
    attrs: impl IntoIterator<Item = Attr>,
) -> WrappedError
where
    E: Error + Send + Sync + 'static,
{
    let message = message.into();
    default_logger().error(&message, std::iter::once(Attr::error(&err)).chain(attrs));
    WrappedError {
        message,
        source: Box::new(err),
    }
}
