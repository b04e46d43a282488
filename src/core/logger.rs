//! Main logger implementation

use super::{
    error::Result,
    flatten::join_key,
    handler::Handler,
    log_level::LogLevel,
    record::{Record, Source},
    sink::Sink,
    value::Attr,
};
use crate::handlers::{HandlerOptions, TextHandler};
use parking_lot::Mutex;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

type SharedHandler = Arc<Mutex<Box<dyn Handler>>>;

/// A configured logger
///
/// Cloning is cheap and clones share the same handler and sink. Loggers
/// derived with [`Logger::with_attrs`] and [`Logger::with_group`] also share
/// the handler; the receiver is never modified.
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    add_source: bool,
    handler: SharedHandler,
    /// Bound attributes, already group-qualified
    attrs: Arc<Vec<Attr>>,
    /// Active group path, dot-joined
    group: String,
}

impl Logger {
    /// Stderr text logger at INFO
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// New logger carrying `attrs` on every record
    ///
    /// Keys are qualified with the currently active group.
    #[must_use]
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let mut bound = Vec::clone(&self.attrs);
        bound.extend(attrs.into_iter().map(|attr| self.qualify(attr)));

        Self {
            attrs: Arc::new(bound),
            ..self.clone()
        }
    }

    /// New logger whose later attributes are nested under `name`
    ///
    /// An empty name returns an identical logger.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        Self {
            group: join_key(&self.group, name),
            ..self.clone()
        }
    }

    fn qualify(&self, attr: Attr) -> Attr {
        if self.group.is_empty() {
            return attr;
        }
        Attr {
            key: join_key(&self.group, &attr.key),
            value: attr.value,
        }
    }

    #[track_caller]
    pub fn log(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        let location = Location::caller();
        self.log_at(level, message.as_ref(), attrs, location);
    }

    fn log_at(
        &self,
        level: LogLevel,
        message: &str,
        attrs: impl IntoIterator<Item = Attr>,
        location: &'static Location<'static>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let mut record = Record::new(level, message);
        record.attrs.extend(self.attrs.iter().cloned());
        record
            .attrs
            .extend(attrs.into_iter().map(|attr| self.qualify(attr)));
        if self.add_source {
            record.source = Some(Source::from_location(location));
        }

        let mut handler = self.handler.lock();
        if let Err(e) = handler.handle(&record) {
            // Log calls never fail outwardly
            eprintln!("[LOGGER ERROR] Handler '{}' failed: {}", handler.name(), e);
        }
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_at(LogLevel::Debug, message.as_ref(), attrs, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_at(LogLevel::Info, message.as_ref(), attrs, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_at(LogLevel::Warn, message.as_ref(), attrs, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_at(LogLevel::Error, message.as_ref(), attrs, Location::caller());
    }

    pub fn flush(&self) -> Result<()> {
        self.handler.lock().flush()
    }

    /// Release the sink if it is a file this logger opened
    ///
    /// Affects every logger sharing the handler. Safe to call repeatedly.
    pub fn close(&self) -> Result<()> {
        self.handler.lock().close()
    }

    /// Capability that releases this logger's sink
    pub fn closer(&self) -> Closer {
        Closer {
            handler: Arc::clone(&self.handler),
        }
    }

    /// True when both loggers write through the same handler
    pub fn shares_handler_with(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("add_source", &self.add_source)
            .field("attrs", &self.attrs.len())
            .field("group", &self.group)
            .finish()
    }
}

/// Releases a logger's sink when called
///
/// Returned by [`crate::new_with_closer`] for callers that manage the sink
/// lifetime themselves. Closing twice is a no-op.
#[derive(Clone)]
pub struct Closer {
    handler: SharedHandler,
}

impl Closer {
    pub fn close(&self) -> Result<()> {
        self.handler.lock().close()
    }
}

impl fmt::Debug for Closer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Closer")
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
///
/// ```
/// use logfacade::core::{LogLevel, Logger, Sink};
/// use logfacade::handlers::{HandlerOptions, JsonHandler};
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .add_source(true)
///     .handler(JsonHandler::new(Sink::stderr(), HandlerOptions::default()))
///     .build();
/// assert!(logger.enabled(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    add_source: bool,
    handler: Option<Box<dyn Handler>>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            add_source: false,
            handler: None,
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    #[must_use]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn boxed_handler(mut self, handler: Box<dyn Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Without a handler, records go to stderr as text
    pub fn build(self) -> Logger {
        let handler = self.handler.unwrap_or_else(|| {
            Box::new(TextHandler::new(Sink::stderr(), HandlerOptions::default()))
        });

        Logger {
            min_level: self.min_level,
            add_source: self.add_source,
            handler: Arc::new(Mutex::new(handler)),
            attrs: Arc::new(Vec::new()),
            group: String::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
