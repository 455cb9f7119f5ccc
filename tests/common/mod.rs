use std::sync::{Arc, Mutex};

use taglog::{Config, Level, Tags};

pub const FORMATTED_MESSAGE: &str = "message returned from recording formatter";

/// What the formatter and output were last called with.
#[derive(Debug, Default, Clone)]
pub struct Captured {
    pub level: Option<Level>,
    pub message: String,
    pub tags: Tags,
    pub date_format: String,
    pub output: String,
    pub calls: usize,
}

#[derive(Clone, Default)]
pub struct Recorder {
    captured: Arc<Mutex<Captured>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A config whose formatter and output write into this recorder.
    pub fn config(&self, level: Level) -> Config {
        let formatter = self.captured.clone();
        let output = self.captured.clone();

        Config::new()
            .with_level(level)
            .with_program("log_test")
            .with_date_format("%Y")
            .with_formatter(
                move |level: Level, message: &str, tags: &Tags, date_format: &str| -> String {
                    let mut captured = formatter.lock().unwrap();
                    captured.level = Some(level);
                    captured.message = message.to_string();
                    captured.tags = tags.clone();
                    captured.date_format = date_format.to_string();
                    FORMATTED_MESSAGE.to_string()
                },
            )
            .with_output(move |line: &str| {
                let mut captured = output.lock().unwrap();
                captured.output = line.to_string();
                captured.calls += 1;
            })
    }

    pub fn captured(&self) -> Captured {
        self.captured.lock().unwrap().clone()
    }
}
