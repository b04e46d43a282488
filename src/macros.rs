//! Logging macros for attaching attributes with `key => value` syntax.
//!
//! # Examples
//!
//! ```
//! use logfacade::{info, Logger};
//!
//! let logger = Logger::new();
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // With attributes
//! let port = 8080;
//! info!(logger, "Server listening"; "port" => port, "tls" => false);
//!
//! // Formatted message
//! info!(logger, format!("User {} logged in", 42); "method" => "password");
//! ```

/// Build a `Vec<Attr>` from `key => value` pairs.
///
/// ```
/// use logfacade::attrs;
///
/// let attrs = attrs!["user" => "alice", "age" => 30];
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs[0].key, "user");
/// ```
#[macro_export]
macro_rules! attrs {
    ($($key:expr => $value:expr),* $(,)?) => {
        vec![$($crate::Attr::new($key, $value)),*]
    };
}

/// Log a message at a given level.
///
/// ```
/// # use logfacade::prelude::*;
/// # let logger = Logger::new();
/// use logfacade::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Request failed"; "status" => 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(; $($key:expr => $value:expr),* $(,)?)?) => {
        $logger.log($level, $msg, $crate::attrs![$($($key => $value),*)?])
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use logfacade::prelude::*;
/// # let logger = Logger::new();
/// use logfacade::error;
/// error!(logger, "Failed to connect to database"; "retries" => 3);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
