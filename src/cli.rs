use std::sync::Arc;

use clap::{Parser, ValueEnum};
use eyre::{Context as _, OptionExt};

use taglog::{
    logging::{StderrSink, StdoutSink, DEFAULT_DATE_FORMAT},
    Config, Context, JsonFormatter, Level, LogFormatter, LogSink, Logger, TextFormatter,
};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Write a single structured log line.", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        default_value = "info",
        help = "Logger level. Debug messages are only written when this is debug."
    )]
    pub level: Level,

    #[arg(long, help = "Write the message at DEBUG instead of INFO.")]
    pub debug: bool,

    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, short, default_value = "taglog", help = "Value of the program tag.")]
    pub program: String,

    #[arg(long, default_value = "main", help = "Value of the function tag.")]
    pub function: String,

    #[arg(
        long = "tag",
        short = 't',
        value_name = "KEY=VALUE",
        value_parser = parse_tag,
        help = "Extra tag, can be repeated."
    )]
    pub tags: Vec<(String, String)>,

    #[arg(long, default_value = DEFAULT_DATE_FORMAT, help = "strftime pattern for the UTC timestamp.")]
    pub date_format: String,

    #[arg(long, help = "Write to stderr instead of stdout.")]
    pub stderr: bool,

    #[arg(long, help = "Colour the timestamp and level of text output.")]
    pub color: bool,

    pub message: String,
}

fn parse_tag(tag: &str) -> eyre::Result<(String, String)> {
    let (key, value) = tag
        .split_once('=')
        .ok_or_eyre("expected a tag in the form KEY=VALUE")?;

    if key.is_empty() {
        return Err(eyre::eyre!("tag key can't be empty"));
    }

    Ok((key.to_string(), value.to_string()))
}

impl Cli {
    fn config(&self) -> Config {
        let formatter: Arc<dyn LogFormatter> = match (self.format, self.color) {
            (OutputFormat::Json, _) => Arc::new(JsonFormatter),
            (OutputFormat::Text, true) => Arc::new(TextFormatter::colored()),
            (OutputFormat::Text, false) => Arc::new(TextFormatter::new()),
        };

        let output: Arc<dyn LogSink> = if self.stderr {
            Arc::new(StderrSink::new())
        } else {
            Arc::new(StdoutSink::new())
        };

        Config {
            formatter,
            output,
            ..Config::new()
                .with_level(self.level)
                .with_program(&self.program)
                .with_function(&self.function)
                .with_date_format(&self.date_format)
        }
    }

    pub fn run(self) -> eyre::Result<()> {
        let logger = Logger::new(self.config());
        let context = Context::map(self.tags.iter().cloned());

        let result = if self.debug {
            logger.debug(&self.message, context)
        } else {
            logger.info(&self.message, context)
        };
        result.context("Failed writing log line")?;

        logger.flush();
        Ok(())
    }
}
