// Output formatting and diagnostics for CLI

use crate::cli::CliResult;
use clap::ValueEnum;
use colored::Colorize;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Success,
    Error,
}

/// Destination for leveled diagnostic messages
pub trait LogSink {
    fn log(&self, level: Level, message: &str);
}

/// Colored console sink: errors go to stderr, everything else to stdout
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Debug => println!("  {}", message.dimmed()),
            Level::Info => println!("  {}", message),
            Level::Success => println!("{} {}", "✓".green().bold(), message),
            Level::Error => eprintln!("{} {}", "✗".red().bold(), message.red()),
        }
    }
}

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
    sink: Box<dyn LogSink>,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self::with_sink(format, quiet, verbose, Box::new(ConsoleSink))
    }

    pub fn with_sink(
        format: OutputFormat,
        quiet: bool,
        verbose: bool,
        sink: Box<dyn LogSink>,
    ) -> Self {
        Self {
            format,
            quiet,
            verbose,
            sink,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Output a record (header information) in the selected format
    pub fn output_value(&self, value: &serde_json::Value, writer: &mut dyn Write) -> CliResult<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(value)?)?;
            }
            OutputFormat::KeyValue => {
                self.output_key_value(value, writer)?;
            }
            OutputFormat::Table => {
                self.output_table(value, writer)?;
            }
        }
        Ok(())
    }

    /// Output as key-value pairs
    fn output_key_value(&self, value: &serde_json::Value, writer: &mut dyn Write) -> CliResult<()> {
        if let Some(obj) = value.as_object() {
            let mut items: Vec<_> = obj.iter().collect();
            items.sort_by(|a, b| a.0.cmp(b.0));

            for (key, value) in items {
                writeln!(writer, "{}: {}", key, format_value(value))?;
            }
        }
        Ok(())
    }

    /// Output as table
    fn output_table(&self, value: &serde_json::Value, writer: &mut dyn Write) -> CliResult<()> {
        if let Some(obj) = value.as_object() {
            let max_key_len = obj.keys().map(|k| k.len()).max().unwrap_or(0);

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;

            for (key, value) in obj {
                writeln!(
                    writer,
                    "{:<width$} {}",
                    format!("{}:", key),
                    format_value(value),
                    width = max_key_len + 2
                )?;
            }

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            self.sink.log(Level::Success, message);
        }
    }

    /// Print error message (never suppressed)
    pub fn print_error(&self, message: &str) {
        self.sink.log(Level::Error, message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            self.sink.log(Level::Info, message);
        }
    }

    /// Print message shown only in verbose mode
    pub fn print_debug(&self, message: &str) {
        if self.verbose {
            self.sink.log(Level::Debug, message);
        }
    }
}

impl LogSink for OutputFormatter {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Debug => self.print_debug(message),
            Level::Info => self.print_info(message),
            Level::Success => self.print_success(message),
            Level::Error => self.print_error(message),
        }
    }
}

/// Format a JSON value for display
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "(null)".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Array(arr) => format!("[{} items]", arr.len()),
        serde_json::Value::Object(obj) => format!("{{{} items}}", obj.len()),
    }
}

/// Progress indicator for batch operations
pub struct ProgressBar {
    total: usize,
    current: usize,
    show: bool,
}

impl ProgressBar {
    pub fn new(total: usize, show: bool) -> Self {
        Self {
            total,
            current: 0,
            show,
        }
    }

    pub fn increment(&mut self, label: &str) {
        self.current += 1;
        if self.show && self.total > 0 {
            let percent = (self.current * 100) / self.total;
            print!("\r[{}/{}] ({}%) {} ", self.current, self.total, percent, label);
            if self.current == self.total {
                println!();
            }
            std::io::stdout().flush().ok();
        }
    }
}
