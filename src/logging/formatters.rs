use std::fmt::Write;

use chrono::{
    format::{Item, StrftimeItems},
    Utc,
};
use yansi::Paint;

use super::{tags::FUNCTION_TAG, Level, LogFormatter, Tags};

/// UTC timestamp with microsecond precision.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

fn timestamp(date_format: &str) -> String {
    let now = Utc::now();
    let items: Vec<Item<'_>> = StrftimeItems::new(date_format).collect();

    if items.iter().any(|item| matches!(item, Item::Error)) {
        return now.format(DEFAULT_DATE_FORMAT).to_string();
    }

    // parse-only specifiers such as `%#z` tokenize fine but fail to render
    let mut time = String::new();
    if write!(time, "{}", now.format_with_items(items.iter())).is_err() {
        return now.format(DEFAULT_DATE_FORMAT).to_string();
    }

    time
}

fn json_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// One JSON object per entry. Tags follow `time`, `level` and `message` in map
/// iteration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl LogFormatter for JsonFormatter {
    fn format(&self, level: Level, message: &str, tags: &Tags, date_format: &str) -> String {
        let mut line = format!(
            "{{\"time\":{},\"level\":{},\"message\":{}",
            json_string(&timestamp(date_format)),
            json_string(level.as_str()),
            json_string(message),
        );

        for (name, value) in tags {
            line.push(',');
            line.push_str(&json_string(name));
            line.push(':');
            line.push_str(&json_string(value));
        }

        line.push('}');
        line
    }
}

/// Tab separated `time level function message tags`, tags as sorted `key:value`
/// pairs without the function tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter {
    use_ansi: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self { use_ansi: false }
    }

    pub fn colored() -> Self {
        Self { use_ansi: true }
    }

    fn timestamp(&self, date_format: &str) -> String {
        let time = timestamp(date_format);
        if self.use_ansi {
            time.bright_black().to_string()
        } else {
            time
        }
    }

    fn format_level(&self, level: Level) -> String {
        if !self.use_ansi {
            return level.as_str().to_string();
        }

        match level {
            Level::Debug => level.as_str().blue().to_string(),
            Level::Info => level.as_str().green().to_string(),
        }
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, level: Level, message: &str, tags: &Tags, date_format: &str) -> String {
        let function = tags.get(FUNCTION_TAG).map(String::as_str).unwrap_or_default();

        let mut keys: Vec<&String> = tags.keys().filter(|k| *k != FUNCTION_TAG).collect();
        keys.sort();

        let rest = keys
            .into_iter()
            .map(|key| format!("{}:{}", key, tags[key]))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.timestamp(date_format),
            self.format_level(level),
            function,
            message,
            rest,
        )
    }
}
