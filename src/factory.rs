//! Logger construction from configuration

use crate::core::{Closer, Config, Logger, Result};
use crate::handlers::{self, HandlerOptions};

/// Build an independent logger from `cfg`
///
/// The configuration is validated before any sink is opened, so an invalid
/// level or format never creates a file. A file sink is owned by the returned
/// logger and released by [`Logger::close`].
pub fn new(cfg: &Config) -> Result<Logger> {
    cfg.validate()?;
    let level = cfg.log_level()?;
    let format = cfg.output_format()?;

    let sink = cfg.output_target().open()?;
    let options = HandlerOptions::new(cfg.timestamp_format(), cfg.tz());

    Ok(Logger::builder()
        .min_level(level)
        .add_source(cfg.add_source)
        .boxed_handler(handlers::for_format(format, sink, options))
        .build())
}

/// Like [`new`], also returning a [`Closer`] that releases the sink
pub fn new_with_closer(cfg: &Config) -> Result<(Logger, Closer)> {
    let logger = new(cfg)?;
    let closer = logger.closer();
    Ok((logger, closer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LoggerError};
    use tempfile::tempdir;

    #[test]
    fn test_invalid_config_opens_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never.log");
        let cfg = Config::new()
            .with_level("verbose")
            .with_output(path.to_string_lossy());

        let err = new(&cfg).unwrap_err();
        assert!(err.is_config());
        assert!(!path.exists());
    }

    #[test]
    fn test_stream_outputs() {
        let logger = new(&Config::new().with_output("stderr").with_level("error")).unwrap();
        assert_eq!(logger.level(), LogLevel::Error);
        assert!(logger.close().is_ok());
    }

    #[test]
    fn test_unopenable_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.log");
        let err = new(&Config::new().with_output(path.to_string_lossy())).unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }

    #[test]
    fn test_new_with_closer_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let (logger, closer) =
            new_with_closer(&Config::production().with_output(path.to_string_lossy())).unwrap();

        logger.info("started", []);
        closer.close().unwrap();
        closer.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
