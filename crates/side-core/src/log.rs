use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// One record per invoked command, for the reporting boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub index: usize,
    pub name: String,
    pub args: Vec<String>,
    pub outcome: Outcome,
}

/// Per-run log sink. Commands may append free-form entries; the runner
/// appends one `CommandRecord` per invocation.
#[derive(Debug, Default)]
pub struct LogRecorder {
    entries: Vec<LogEntry>,
    commands: Vec<CommandRecord>,
}

impl LogRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.entries.push(LogEntry {
            level: LogLevel::Info,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.entries.push(LogEntry {
            level: LogLevel::Error,
            message: message.into(),
        });
    }

    pub fn record_command(&mut self, record: CommandRecord) {
        let level = if record.outcome.severity() > Outcome::Success.severity() {
            LogLevel::Error
        } else {
            LogLevel::Info
        };
        self.entries.push(LogEntry {
            level,
            message: format!(
                "[{}] {} {:?} => {}",
                record.index, record.name, record.args, record.outcome
            ),
        });
        self.commands.push(record);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn commands(&self) -> &[CommandRecord] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.commands.clear();
    }
}
