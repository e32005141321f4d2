//! Pipeline log helpers.
//!
//! Entries go through the `log` facade; the binary installs `env_logger`.
//! Library users get whatever logger they configured (or none).

/// Log level of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth, rendered as leading spaces.
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Message with indentation and the level marker applied.
    pub fn render(&self) -> String {
        let indent = "   ".repeat(self.indent as usize);
        match self.level {
            LogLevel::Success => format!("{}✓ {}", indent, self.message),
            LogLevel::Error => format!("{}❌ {}", indent, self.message),
            _ => format!("{}{}", indent, self.message),
        }
    }
}

/// Emit an entry through the `log` facade.
pub fn emit(entry: LogEntry) {
    let text = entry.render();
    match entry.level {
        LogLevel::Info | LogLevel::Success => log::info!("{}", text),
        LogLevel::Warning => log::warn!("{}", text),
        LogLevel::Error => log::error!("{}", text),
    }
}

pub fn log_info(msg: impl Into<String>) {
    emit(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    emit(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    emit(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    emit(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    emit(LogEntry::info(msg).with_indent(indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(LogEntry::info("reading").render(), "reading");
        assert_eq!(LogEntry::success("done").render(), "✓ done");
        assert_eq!(LogEntry::warning("row 3").with_indent(2).render(), "      row 3");
        assert_eq!(LogEntry::error("Error: no input").render(), "❌ Error: no input");
    }

    #[test]
    fn test_error_entry_level() {
        let entry = LogEntry::error("failed");
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.indent, 0);
        // No logger installed in tests; emitting must still be harmless.
        log_error("failed");
    }
}
