// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Level-tagged lines on stdout, colored or plain, optionally captured in memory.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

const RESET: &str = "\x1b[0m";

/// Severity tag shown in front of every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
    Warn,
}

impl Level {
    pub fn label(&self) -> &'static str {
        match self {
            Level::Success => "SUCCESS",
            Level::Error => "ERROR",
            Level::Info => "INFO",
            Level::Warn => "WARN",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Level::Success => "\x1b[92m",
            Level::Error => "\x1b[91m",
            Level::Info => "\x1b[94m",
            Level::Warn => "\x1b[93m",
        }
    }
}

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// ANSI-colored level tags
    Color,
    /// No escape sequences (NO_COLOR, pipes, tests)
    Plain,
}

enum Sink {
    Stdout,
    Buffer(Arc<Mutex<Vec<String>>>),
}

/// Handle to lines captured by a buffered [`Output`].
#[derive(Clone, Default)]
pub struct OutputBuffer(Arc<Mutex<Vec<String>>>);

impl OutputBuffer {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.lock().iter().any(|line| line.contains(needle))
    }
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
    sink: Sink,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
            sink: Sink::Stdout,
        }
    }

    /// Output that records lines instead of printing them.
    pub fn buffered(mode: OutputMode) -> (Self, OutputBuffer) {
        let buffer = OutputBuffer::default();
        let output = Self {
            mode,
            start_time: None,
            sink: Sink::Buffer(Arc::clone(&buffer.0)),
        };
        (output, buffer)
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn info(&self, message: &str) {
        self.line(Level::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.line(Level::Success, message);
    }

    pub fn warning(&self, message: &str) {
        self.line(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.line(Level::Error, message);
    }

    /// Success or warning depending on `ok`.
    pub fn status(&self, ok: bool, message: &str) {
        self.line(if ok { Level::Success } else { Level::Warn }, message);
    }

    pub fn line(&self, level: Level, message: &str) {
        let rendered = format_line(self.mode, level, message);
        match &self.sink {
            Sink::Stdout => println!("{rendered}"),
            Sink::Buffer(lines) => lines.lock().push(rendered),
        }
    }
}

/// Render one line: the level tag padded to eight columns, then the message.
pub fn format_line(mode: OutputMode, level: Level, message: &str) -> String {
    match mode {
        OutputMode::Color => format!("{}{:8}{} {}", level.color(), level.label(), RESET, message),
        OutputMode::Plain => format!("{:8} {}", level.label(), message),
    }
}
