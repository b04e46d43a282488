//! Request-scoped logger propagation
//!
//! A [`Context`] is an immutable carrier passed down a call chain. Deriving a
//! context never changes the one it came from.

use crate::core::{Attr, Logger};
use crate::global::default_logger;
use std::fmt;

/// Attribute key bound by [`with_request_id`]
pub const REQUEST_ID_KEY: &str = "request_id";

#[derive(Clone, Default)]
pub struct Context {
    logger: Option<Logger>,
    request_id: Option<String>,
}

impl Context {
    /// Empty root context
    pub fn background() -> Self {
        Self::default()
    }

    /// Logger attached to this context, if any
    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("logger", &self.logger.is_some())
            .field("request_id", &self.request_id)
            .finish()
    }
}

/// Derive a context carrying `logger`
pub fn with_logger(ctx: &Context, logger: Logger) -> Context {
    Context {
        logger: Some(logger),
        ..ctx.clone()
    }
}

/// The context's logger, or the process-wide default
pub fn from_context(ctx: &Context) -> Logger {
    match &ctx.logger {
        Some(logger) => logger.clone(),
        None => default_logger(),
    }
}

/// Derive a context whose logger adds `request_id` to every record
pub fn with_request_id(ctx: &Context, id: impl Into<String>) -> Context {
    let id = id.into();
    let logger = from_context(ctx).with_attrs([Attr::new(REQUEST_ID_KEY, id.as_str())]);
    Context {
        logger: Some(logger),
        request_id: Some(id),
    }
}
