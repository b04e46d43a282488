//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A configuration field holds a value outside its accepted set
    #[error("invalid log {field} \"{value}\": must be one of {}", accepted.join(", "))]
    InvalidConfiguration {
        field: String,
        value: String,
        accepted: Vec<String>,
    },

    /// IO error with the operation and sink path that failed
    #[error("IO error while {operation} '{path}': {source}")]
    IoOperation {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Write attempted on a sink whose closer already ran
    #[error("sink '{path}' is closed")]
    SinkClosed { path: String },
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config<A, S>(field: impl Into<String>, value: impl Into<String>, accepted: A) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LoggerError::InvalidConfiguration {
            field: field.into(),
            value: value.into(),
            accepted: accepted.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    pub fn sink_closed(path: impl Into<String>) -> Self {
        LoggerError::SinkClosed { path: path.into() }
    }

    /// True for errors caused by invalid configuration values
    pub fn is_config(&self) -> bool {
        matches!(self, LoggerError::InvalidConfiguration { .. })
    }
}
