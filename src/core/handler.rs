//! Handler trait: encodes records and writes them to a sink

use super::{error::Result, record::Record};

pub trait Handler: Send {
    fn handle(&mut self, record: &Record) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    /// Release the sink if it is a file this handler opened
    fn close(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
