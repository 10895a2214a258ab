//! Logging of tool executions.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Logger for tool executions and adapter events.
///
/// Creates markdown-formatted log files so a session's tool traffic can
/// be audited: which tools ran, with what arguments, and whether the
/// envelope came back as success or error.
#[derive(Debug)]
pub struct Logger {
    log_file: PathBuf,
}

impl Logger {
    /// Initialize logger.
    ///
    /// # Arguments
    /// * `log_file` - Path to log file. If None, creates a timestamped
    ///   file in the temp directory.
    pub fn new(log_file: Option<&Path>) -> Result<Self> {
        let log_file = match log_file {
            Some(p) => p.to_path_buf(),
            None => {
                let mut dir = std::env::temp_dir();
                dir.push("travelkit-logs");
                std::fs::create_dir_all(&dir).with_context(|| {
                    format!("Failed to create log directory: {}", dir.display())
                })?;
                let filename = format!(
                    "tools_{}_{}.md",
                    Utc::now().timestamp_millis(),
                    std::process::id()
                );
                dir.join(filename)
            }
        };

        // Ensure log directory exists
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let logger = Self { log_file };

        if !logger.log_file.exists() {
            logger.initialize_log_file()?;
        }

        Ok(logger)
    }

    /// Initialize the log file with header.
    fn initialize_log_file(&self) -> Result<()> {
        let mut file = File::create(&self.log_file)
            .with_context(|| format!("Failed to create log file: {}", self.log_file.display()))?;

        let now: DateTime<Utc> = Utc::now();

        writeln!(file, "# Tool Execution Log\n")?;
        writeln!(file, "Log started: {}\n", now.to_rfc3339())?;
        writeln!(file, "---\n")?;

        Ok(())
    }

    /// Append content to log file.
    fn append_to_log(&self, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log file: {}", self.log_file.display()))?;

        write!(file, "{}", content).with_context(|| "Failed to write to log file")?;

        Ok(())
    }

    /// Log one tool execution.
    ///
    /// # Arguments
    /// * `name` - Tool name.
    /// * `arguments` - JSON arguments the tool was invoked with.
    /// * `result` - Serialized envelope returned to the agent.
    /// * `success` - Whether the envelope status was success.
    pub fn log_tool_execution(
        &self,
        name: &str,
        arguments: &str,
        result: &str,
        success: bool,
    ) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let marker = if success { "OK" } else { "ERROR" };
        let content = format!(
            "## Tool: {} [{}] - {}\n\n**Arguments:**\n```json\n{}\n```\n\n**Result:**\n```json\n{}\n```\n\n",
            name,
            marker,
            now.to_rfc3339(),
            arguments,
            result
        );

        self.append_to_log(&content)
    }

    /// Log an informational adapter event.
    pub fn info(&self, message: &str) -> Result<()> {
        let content = format!("**INFO:** {}\n\n", message);
        self.append_to_log(&content)
    }

    /// Log an adapter error event.
    pub fn error(&self, message: &str) -> Result<()> {
        let content = format!("**ERROR:** {}\n\n", message);
        self.append_to_log(&content)
    }

    /// Path of the log file being written.
    pub fn log_path(&self) -> &Path {
        &self.log_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logger_creates_file_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tools.md");

        let logger = Logger::new(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(logger.log_path(), path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Tool Execution Log"));
    }

    #[test]
    fn test_log_tool_execution() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tools.md");
        let logger = Logger::new(Some(&path)).unwrap();

        logger
            .log_tool_execution(
                "check_weather",
                r#"{"location": "Paris"}"#,
                r#"{"status": "error", "error": "Could not retrieve weather data"}"#,
                false,
            )
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("check_weather"));
        assert!(content.contains("[ERROR]"));
        assert!(content.contains("Could not retrieve weather data"));
    }

    #[test]
    fn test_info_and_error_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tools.md");
        let logger = Logger::new(Some(&path)).unwrap();

        logger.info("7 hotel offers outside $150-$250 nightly range").unwrap();
        logger.error("token request failed").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("**INFO:** 7 hotel offers"));
        assert!(content.contains("**ERROR:** token request failed"));
    }
}
