//! # logfacade
//!
//! An environment-aware structured logging facade.
//!
//! ## Features
//!
//! - **Three encodings**: JSON lines, `key=value` text, and colorized JSON-shaped lines
//! - **Flattening**: the colorized format expands JSON strings, maps and records
//!   into dotted keys
//! - **Environment configuration**: `LOG_*` variables or sandbox auto-detection
//! - **Scoped loggers**: derived attributes and groups, request contexts, and a
//!   process-wide default
//!
//! ```no_run
//! use logfacade::{Attr, Context};
//!
//! logfacade::init_env()?;
//! logfacade::info("service started", [Attr::new("port", 8080)]);
//!
//! let ctx = logfacade::with_request_id(&Context::background(), "req-1");
//! logfacade::from_context(&ctx)
//!     .with_group("http")
//!     .info("request", [Attr::new("method", "GET")]);
//!
//! logfacade::close()?;
//! # Ok::<(), logfacade::LoggerError>(())
//! ```

pub mod context;
pub mod core;
pub mod env;
pub mod factory;
pub mod global;
pub mod handlers;
pub mod helpers;
pub mod macros;

pub mod prelude {
    pub use crate::context::{from_context, with_logger, with_request_id, Context};
    pub use crate::core::{
        Attr, Closer, Config, FieldValue, Handler, LogLevel, Logger, LoggerBuilder, LoggerError,
        OutputFormat, Result, TimestampFormat, Timezone,
    };
    pub use crate::factory::{new, new_with_closer};
    pub use crate::helpers::{format_bytes, log_and_wrap, log_error, WrappedError};
}

pub use crate::context::{from_context, with_logger, with_request_id, Context};
pub use crate::core::{
    Attr, Closer, Config, FieldValue, Handler, LogLevel, Logger, LoggerBuilder, LoggerError,
    OutputFormat, Result, TimestampFormat, Timezone,
};
pub use crate::factory::{new, new_with_closer};
pub use crate::global::{
    close, debug, default_logger, error, info, init_auto, init_cfg, init_env, set_default, warn,
};
pub use crate::helpers::{format_bytes, log_and_wrap, log_error, WrappedError};
