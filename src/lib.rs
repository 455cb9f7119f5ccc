//! Leveled, tagged logging with per-logger context.
//!
//! A [`Logger`] carries a set of tags (always including `program` and
//! `function`). Every call merges caller supplied [`Context`] into a fresh copy
//! of those tags before handing them to the configured formatter and output.
//! Child loggers start from an independent copy of their parent's tags.

pub mod error;
pub mod logging;

pub use error::{InvalidContextError, ParseLevelError};
pub use logging::{
    Config, Context, Contextual, Field, JsonFormatter, Level, LogBridge, LogFormatter, LogSink,
    Logger, NullLogger, StructuredLogger, Tags, TextFormatter,
};
