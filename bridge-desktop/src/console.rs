//! Console logger sink for desktop development.

use bridge_traits::{
    error::Result,
    time::{LogEntry, LogLevel, LoggerSink},
};
use std::io::{self, Write};

/// Output layout of [`ConsoleLogger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleFormat {
    /// `[timestamp] LEVEL target: message`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Writes one line per entry to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    pub min_level: LogLevel,
    pub format: ConsoleFormat,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            format: ConsoleFormat::Text,
        }
    }
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            ..Default::default()
        }
    }

    pub fn json(mut self) -> Self {
        self.format = ConsoleFormat::Json;
        self
    }

    /// Render an entry the way it is written to the console.
    pub fn render(&self, entry: &LogEntry) -> Result<String> {
        match self.format {
            ConsoleFormat::Text => {
                let mut line = format!(
                    "[{}] {} {}: {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                    entry.level,
                    entry.target,
                    entry.message
                );
                if !entry.fields.is_empty() {
                    let mut fields: Vec<_> = entry.fields.iter().collect();
                    fields.sort();
                    let rendered: Vec<String> =
                        fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
                    line.push_str(" {");
                    line.push_str(&rendered.join(", "));
                    line.push('}');
                }
                Ok(line)
            }
            ConsoleFormat::Json => Ok(serde_json::to_string(entry)?),
        }
    }

    /// Whether entries at `level` are written.
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Write `entry` as one line to `out` unless it is below the minimum level.
    ///
    /// Returns whether a line was written.
    pub fn write_entry<W: Write>(&self, out: &mut W, entry: &LogEntry) -> Result<bool> {
        if !self.accepts(entry.level) {
            return Ok(false);
        }
        let line = self.render(entry)?;
        writeln!(out, "{line}")?;
        Ok(true)
    }
}

impl LoggerSink for ConsoleLogger {
    fn log(&self, entry: LogEntry) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.write_entry(&mut stdout, &entry)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}
