//! Core logger types and traits

pub mod config;
pub mod error;
pub mod flatten;
pub mod handler;
pub mod log_level;
pub mod logger;
pub mod output_format;
pub mod record;
pub mod sink;
pub mod timestamp;
pub mod value;

pub use config::Config;
pub use error::{LoggerError, Result};
pub use flatten::{flatten, flatten_into, join_key, KEY_SEPARATOR};
pub use handler::Handler;
pub use log_level::{LogLevel, ACCEPTED_LEVELS};
pub use logger::{Closer, Logger, LoggerBuilder};
pub use output_format::{OutputFormat, ACCEPTED_FORMATS};
pub use record::{Record, Source};
pub use sink::{Output, Sink};
pub use timestamp::{TimestampFormat, Timezone};
pub use value::{Attr, FieldValue};
