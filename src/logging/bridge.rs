use eyre::Context as _;
use log::{LevelFilter, Log};

use super::{context::Context, logger::Logger, Level};

/// Routes records from the `log` macros through a [`Logger`].
///
/// Error, warn and info records are written at INFO, debug and trace records at
/// DEBUG. Each record carries a `target` tag, and a `module` tag when the module
/// path is known.
#[derive(Debug)]
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn max_level(&self) -> LevelFilter {
        match self.logger.level() {
            Level::Debug => LevelFilter::Trace,
            Level::Info => LevelFilter::Info,
        }
    }

    /// Installs the bridge as the global `log` logger.
    pub fn init(self) -> eyre::Result<()> {
        log::set_max_level(self.max_level());
        log::set_boxed_logger(Box::new(self)).context("Failed registering boxed logger")?;

        Ok(())
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.max_level() >= metadata.level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut pairs = vec![("target".to_string(), record.target().to_string())];
        if let Some(module) = record.module_path() {
            pairs.push(("module".to_string(), module.to_string()));
        }

        let message = record.args().to_string();
        let context = Context::Map(pairs);

        // a map context always normalizes
        let _ = match record.level() {
            log::Level::Error | log::Level::Warn | log::Level::Info => {
                self.logger.info(&message, context)
            }
            log::Level::Debug | log::Level::Trace => self.logger.debug(&message, context),
        };
    }

    fn flush(&self) {
        self.logger.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::logging::{Config, JsonFormatter};

    fn bridge(level: Level) -> (LogBridge, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = lines.clone();
        let logger = Logger::new(
            Config::new()
                .with_level(level)
                .with_program("bridge_test")
                .with_formatter(JsonFormatter)
                .with_output(move |line: &str| sink.lock().unwrap().push(line.to_string())),
        );

        (LogBridge::new(logger), lines)
    }

    #[test]
    fn test_info_record_is_forwarded_with_target() {
        let (bridge, lines) = bridge(Level::Info);

        bridge.log(
            &log::Record::builder()
                .args(format_args!("connected to {}", "db"))
                .level(log::Level::Warn)
                .target("app")
                .module_path(Some("app::db"))
                .build(),
        );

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);

        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["message"], "connected to db");
        assert_eq!(value["target"], "app");
        assert_eq!(value["module"], "app::db");
        assert_eq!(value["program"], "bridge_test");
    }

    #[test]
    fn test_debug_record_respects_gate() {
        let (bridge, lines) = bridge(Level::Info);

        bridge.log(
            &log::Record::builder()
                .args(format_args!("noisy"))
                .level(log::Level::Trace)
                .target("app")
                .build(),
        );

        assert!(lines.lock().unwrap().is_empty());
        assert_eq!(bridge.max_level(), LevelFilter::Info);
    }

    #[test]
    fn test_debug_record_at_debug_level() {
        let (bridge, lines) = bridge(Level::Debug);

        bridge.log(
            &log::Record::builder()
                .args(format_args!("noisy"))
                .level(log::Level::Debug)
                .target("app")
                .build(),
        );

        let lines = lines.lock().unwrap();
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["level"], "DEBUG");
        assert!(value.get("module").is_none());
    }
}
