//! Output destinations for encoded log lines

use super::error::{LoggerError, Result};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where a logger writes, as named in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl Output {
    /// `stdout` and `stderr` (any casing) name the standard streams; anything
    /// else is a file path
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("stdout") {
            Output::Stdout
        } else if s.eq_ignore_ascii_case("stderr") {
            Output::Stderr
        } else {
            Output::File(PathBuf::from(s))
        }
    }

    pub fn open(&self) -> Result<Sink> {
        match self {
            Output::Stdout => Ok(Sink::stdout()),
            Output::Stderr => Ok(Sink::stderr()),
            Output::File(path) => Sink::file(path),
        }
    }
}

enum Target {
    Stdout,
    Stderr,
    File {
        path: PathBuf,
        writer: Option<BufWriter<File>>,
    },
    Writer(Box<dyn Write + Send>),
}

/// A line-oriented output destination
///
/// Each line is written and flushed in one call so concurrent loggers
/// sharing a file append whole lines.
pub struct Sink {
    target: Target,
}

impl Sink {
    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            target: Target::Stderr,
        }
    }

    /// Open `path` for append, creating it if absent
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.display().to_string(), e))?;

        Ok(Self {
            target: Target::File {
                path,
                writer: Some(BufWriter::new(file)),
            },
        })
    }

    /// Write into any caller-supplied writer
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            target: Target::Writer(Box::new(writer)),
        }
    }

    /// Write `line` followed by a newline, then flush
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        match &mut self.target {
            Target::Stdout => write_flush(&mut io::stdout().lock(), &buf)?,
            Target::Stderr => write_flush(&mut io::stderr().lock(), &buf)?,
            Target::File { path, writer } => {
                let writer = writer
                    .as_mut()
                    .ok_or_else(|| LoggerError::sink_closed(path.display().to_string()))?;
                write_flush(writer, &buf).map_err(|e| {
                    LoggerError::io_operation("writing log file", path.display().to_string(), e)
                })?;
            }
            Target::Writer(writer) => write_flush(writer, &buf)?,
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.target {
            Target::Stdout => io::stdout().flush()?,
            Target::Stderr => io::stderr().flush()?,
            Target::File { writer, .. } => {
                if let Some(writer) = writer {
                    writer.flush()?;
                }
            }
            Target::Writer(writer) => writer.flush()?,
        }
        Ok(())
    }

    /// Flush and release an owned file; a no-op for streams and on repeat calls
    pub fn close(&mut self) -> Result<()> {
        match &mut self.target {
            Target::File { path, writer } => match writer.take() {
                Some(writer) => {
                    let file = writer.into_inner().map_err(|e| {
                        LoggerError::io_operation(
                            "flushing log file",
                            path.display().to_string(),
                            e.into_error(),
                        )
                    })?;
                    file.sync_all().map_err(|e| {
                        LoggerError::io_operation("closing log file", path.display().to_string(), e)
                    })?;
                    Ok(())
                }
                None => Ok(()),
            },
            _ => self.flush(),
        }
    }

    /// True while this sink holds an open file handle
    pub fn owns_file(&self) -> bool {
        matches!(self.target, Target::File { writer: Some(_), .. })
    }
}

fn write_flush<W: Write + ?Sized>(writer: &mut W, buf: &str) -> io::Result<()> {
    writer.write_all(buf.as_bytes())?;
    writer.flush()
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::Stdout => f.write_str("Sink(stdout)"),
            Target::Stderr => f.write_str("Sink(stderr)"),
            Target::File { path, .. } => write!(f, "Sink({})", path.display()),
            Target::Writer(_) => f.write_str("Sink(writer)"),
        }
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the destination
        let _ = self.flush();
    }
}
