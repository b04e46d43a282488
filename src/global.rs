//! Process-wide default logger
//!
//! Reads are lock-free; installing a new default is serialized. Until a
//! default is installed, [`default_logger`] returns a stderr text logger at INFO.

use crate::core::{Attr, Config, Logger, Result};
use crate::factory;
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

static DEFAULT: ArcSwapOption<Logger> = ArcSwapOption::const_empty();
static INSTALL_LOCK: Mutex<()> = parking_lot::const_mutex(());
static FALLBACK: OnceLock<Logger> = OnceLock::new();

/// Install a logger chosen by the sandbox indicator, see [`Config::auto`]
pub fn init_auto() -> Result<()> {
    init_cfg(&Config::auto())
}

/// Install a logger configured from the `LOG_*` variables, see [`Config::from_env`]
pub fn init_env() -> Result<()> {
    init_cfg(&Config::from_env())
}

/// Validate `cfg`, build a logger and install it as the default
///
/// On error the previous default stays in place.
pub fn init_cfg(cfg: &Config) -> Result<()> {
    let logger = factory::new(cfg)?;
    set_default(logger);
    Ok(())
}

/// Install an already built logger as the default
///
/// The previous default is not closed; loggers derived from it keep working.
pub fn set_default(logger: Logger) {
    let _guard = INSTALL_LOCK.lock();
    DEFAULT.store(Some(Arc::new(logger)));
}

pub fn default_logger() -> Logger {
    match DEFAULT.load_full() {
        Some(logger) => Logger::clone(&logger),
        None => FALLBACK.get_or_init(Logger::new).clone(),
    }
}

/// Release the default logger's file sink; a no-op for streams
pub fn close() -> Result<()> {
    let _guard = INSTALL_LOCK.lock();
    match DEFAULT.load_full() {
        Some(logger) => logger.close(),
        None => Ok(()),
    }
}

#[track_caller]
pub fn debug(message: impl AsRef<str>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().debug(message, attrs);
}

#[track_caller]
pub fn info(message: impl AsRef<str>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().info(message, attrs);
}

#[track_caller]
pub fn warn(message: impl AsRef<str>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().warn(message, attrs);
}

#[track_caller]
pub fn error(message: impl AsRef<str>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().error(message, attrs);
}
