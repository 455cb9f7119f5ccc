use std::{fmt, sync::Arc};

use super::{
    context::Context,
    formatters::{TextFormatter, DEFAULT_DATE_FORMAT},
    sinks::StdoutSink,
    tags::{merge, Tags, FUNCTION_TAG, PROGRAM_TAG},
    Level, LogFormatter, LogSink,
};
use crate::error::InvalidContextError;

pub const DEFAULT_FUNCTION: &str = "main";

/// Everything a [`Logger`] needs. Each logger owns its own copy; cloning shares
/// the formatter and output but never the tags.
#[derive(Clone)]
pub struct Config {
    pub level: Level,
    pub formatter: Arc<dyn LogFormatter>,
    pub output: Arc<dyn LogSink>,
    pub program: String,
    pub function: String,
    pub date_format: String,
    pub tags: Tags,
}

impl Config {
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            formatter: Arc::new(TextFormatter::new()),
            output: Arc::new(StdoutSink::new()),
            program: String::new(),
            function: DEFAULT_FUNCTION.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            tags: Tags::new(),
        }
    }

    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    pub fn with_formatter(self, formatter: impl LogFormatter + 'static) -> Self {
        Self {
            formatter: Arc::new(formatter),
            ..self
        }
    }

    pub fn with_output(self, output: impl LogSink + 'static) -> Self {
        Self {
            output: Arc::new(output),
            ..self
        }
    }

    pub fn with_program(self, program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..self
        }
    }

    pub fn with_function(self, function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            ..self
        }
    }

    pub fn with_date_format(self, date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            ..self
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_tags(self, tags: Tags) -> Self {
        Self { tags, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("level", &self.level)
            .field("program", &self.program)
            .field("function", &self.function)
            .field("date_format", &self.date_format)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Logger {
    config: Config,
}

impl Logger {
    /// Creates a root logger. The `program` and `function` tags are always set
    /// from the config, replacing whatever `config.tags` held for those keys.
    pub fn new(mut config: Config) -> Self {
        if config.function.is_empty() {
            config.function = DEFAULT_FUNCTION.to_string();
        }

        config
            .tags
            .insert(PROGRAM_TAG.to_string(), config.program.clone());
        config
            .tags
            .insert(FUNCTION_TAG.to_string(), config.function.clone());

        Self { config }
    }

    pub fn level(&self) -> Level {
        self.config.level
    }

    pub fn tags(&self) -> &Tags {
        &self.config.tags
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn info(&self, message: &str, context: impl Into<Context>) -> Result<(), InvalidContextError> {
        let tags = merge(&self.config.tags, &context.into())?;
        self.emit(Level::Info, message, &tags);
        Ok(())
    }

    /// Like [`Logger::info`], but only emits when the logger level is
    /// [`Level::Debug`]. The context is merged either way, so an invalid context
    /// is reported even when nothing is written.
    pub fn debug(&self, message: &str, context: impl Into<Context>) -> Result<(), InvalidContextError> {
        let tags = merge(&self.config.tags, &context.into())?;
        if self.config.level == Level::Debug {
            self.emit(Level::Debug, message, &tags);
        }
        Ok(())
    }

    /// Derives a logger for `function`. The child starts from a copy of this
    /// logger's tags, and `context` may override any of them, `function`
    /// included.
    pub fn child_logger(
        &self,
        function: &str,
        context: impl Into<Context>,
    ) -> Result<Logger, InvalidContextError> {
        let mut config = self.config.clone();
        config.function = function.to_string();
        config
            .tags
            .insert(FUNCTION_TAG.to_string(), function.to_string());
        config.tags = merge(&config.tags, &context.into())?;

        Ok(Logger { config })
    }

    pub fn flush(&self) {
        self.config.output.flush()
    }

    fn emit(&self, level: Level, message: &str, tags: &Tags) {
        let line = self
            .config
            .formatter
            .format(level, message, tags, &self.config.date_format);
        self.config.output.write_line(&line);
    }
}

/// Object safe view of a logger, for code that wants to accept any logger or a
/// stand-in such as [`NullLogger`].
pub trait StructuredLogger: Send + Sync {
    fn info(&self, message: &str, context: Context) -> Result<(), InvalidContextError>;

    fn debug(&self, message: &str, context: Context) -> Result<(), InvalidContextError>;

    fn child_logger(
        &self,
        function: &str,
        context: Context,
    ) -> Result<Box<dyn StructuredLogger>, InvalidContextError>;
}

impl StructuredLogger for Logger {
    fn info(&self, message: &str, context: Context) -> Result<(), InvalidContextError> {
        Logger::info(self, message, context)
    }

    fn debug(&self, message: &str, context: Context) -> Result<(), InvalidContextError> {
        Logger::debug(self, message, context)
    }

    fn child_logger(
        &self,
        function: &str,
        context: Context,
    ) -> Result<Box<dyn StructuredLogger>, InvalidContextError> {
        Ok(Box::new(Logger::child_logger(self, function, context)?))
    }
}

/// Accepts everything and writes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl StructuredLogger for NullLogger {
    fn info(&self, _message: &str, _context: Context) -> Result<(), InvalidContextError> {
        Ok(())
    }

    fn debug(&self, _message: &str, _context: Context) -> Result<(), InvalidContextError> {
        Ok(())
    }

    fn child_logger(
        &self,
        _function: &str,
        _context: Context,
    ) -> Result<Box<dyn StructuredLogger>, InvalidContextError> {
        Ok(Box::new(NullLogger))
    }
}
