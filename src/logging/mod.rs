mod bridge;
mod context;
mod formatters;
mod logger;
mod sinks;
mod tags;

use std::{fmt, str::FromStr};

pub use bridge::LogBridge;
pub use context::{normalize, Context, Contextual, Field, CONTEXT_KEY, ERROR_KEY};
pub use formatters::{JsonFormatter, TextFormatter, DEFAULT_DATE_FORMAT};
pub use logger::{Config, Logger, NullLogger, StructuredLogger};
pub use sinks::{FileSink, NullSink, StderrSink, StdoutSink};
pub use tags::{merge, Tags, FUNCTION_TAG, PROGRAM_TAG};

use crate::error::ParseLevelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    Debug,
    #[default]
    Info,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("debug") {
            Ok(Level::Debug)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Level::Info)
        } else {
            Err(ParseLevelError(s.to_string()))
        }
    }
}

/// Renders a single log entry into the line handed to the sink.
pub trait LogFormatter: Sync + Send {
    fn format(&self, level: Level, message: &str, tags: &Tags, date_format: &str) -> String;
}

impl<F> LogFormatter for F
where
    F: Fn(Level, &str, &Tags, &str) -> String + Sync + Send,
{
    fn format(&self, level: Level, message: &str, tags: &Tags, date_format: &str) -> String {
        self(level, message, tags, date_format)
    }
}

/// Delivers formatted lines. Failures stay inside the sink.
pub trait LogSink: Sync + Send {
    fn write_line(&self, line: &str);

    fn flush(&self) {}
}

impl<F> LogSink for F
where
    F: Fn(&str) + Sync + Send,
{
    fn write_line(&self, line: &str) {
        self(line)
    }
}
