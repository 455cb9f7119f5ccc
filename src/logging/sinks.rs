use std::{
    fs::File,
    io::{LineWriter, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use eyre::Context;

use super::LogSink;

// Sinks swallow write errors: a failing log line must never fail the caller.

pub struct StdoutSink {
    handle: std::io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            handle: std::io::stdout(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut writer = self.handle.lock();
        let _ = writeln!(writer, "{}", line);
    }

    fn flush(&self) {
        let _ = self.handle.lock().flush();
    }
}

pub struct StderrSink {
    handle: std::io::Stderr,
}

impl StderrSink {
    pub fn new() -> Self {
        Self {
            handle: std::io::stderr(),
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for StderrSink {
    fn write_line(&self, line: &str) {
        let mut writer = self.handle.lock();
        let _ = writeln!(writer, "{}", line);
    }

    fn flush(&self) {
        let _ = self.handle.lock().flush();
    }
}

/// Appends lines to a file. No rotation.
pub struct FileSink {
    file: Mutex<LineWriter<File>>,
    file_path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed opening or creating log file {}", path.display()))?;

        Ok(Self {
            file: Mutex::new(LineWriter::new(file)),
            file_path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(file, "{}", line);
    }

    fn flush(&self) {
        let _ = self
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
    }
}

#[derive(Debug, Default)]
pub struct NullSink {}

impl NullSink {
    pub fn new() -> Self {
        Self {}
    }
}

impl LogSink for NullSink {
    fn write_line(&self, _line: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("taglog-{}-{}.log", name, std::process::id()))
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let path = temp_log_path("append");
        let _ = std::fs::remove_file(&path);

        {
            let sink = FileSink::new(&path).unwrap();
            sink.write_line("first");
            sink.write_line("second");
            sink.flush();
            assert_eq!(sink.path(), path.as_path());
        }

        let sink = FileSink::new(&path).unwrap();
        sink.write_line("third");
        sink.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\nthird\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_sink_keeps_writing_after_poisoned_lock() {
        let path = temp_log_path("poisoned");
        let _ = std::fs::remove_file(&path);

        let sink = std::sync::Arc::new(FileSink::new(&path).unwrap());
        let holder = sink.clone();
        let result = std::thread::spawn(move || {
            let _guard = holder.file.lock().unwrap();
            panic!("writer died while holding the file");
        })
        .join();

        assert!(result.is_err());
        assert!(sink.file.is_poisoned());

        sink.write_line("after");
        sink.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "after\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_sink_reports_unopenable_path() {
        let dir = std::env::temp_dir();
        let err = match FileSink::new(&dir) {
            Ok(_) => panic!("opening a directory as a log file should fail"),
            Err(err) => err,
        };

        assert!(err.to_string().starts_with("Failed opening or creating log file"));
    }

    #[test]
    fn test_closure_is_a_sink() {
        let lines = Mutex::new(Vec::new());
        let sink = |line: &str| lines.lock().unwrap().push(line.to_string());

        sink.write_line("hello");
        LogSink::flush(&sink);

        assert_eq!(*lines.lock().unwrap(), vec!["hello".to_string()]);
    }
}
