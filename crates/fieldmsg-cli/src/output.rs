//! Output formatting and writing utilities
//!
//! Machine formats (JSON, YAML) carry exactly the handler's output so they can
//! be piped; the human format adds labels and color.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use fieldmsg_core::{MessageCatalog, ValidationFieldError};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a transformed field error
    fn format_field_error(&self, error: &ValidationFieldError, explain: bool) -> Result<String>;

    /// Format a message catalog
    fn format_catalog(&self, catalog: &MessageCatalog) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_field_error(&self, error: &ValidationFieldError, explain: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_field_error_human(error, explain)),
            _ => self.format(error),
        }
    }

    fn format_catalog(&self, catalog: &MessageCatalog) -> Result<String> {
        match self {
            OutputFormat::Human => {
                let width = catalog.iter().map(|(kind, _)| kind.len()).max().unwrap_or(0);
                Ok(catalog
                    .iter()
                    .map(|(kind, template)| format!("{:width$}  {}", kind, template, width = width))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            _ => self.format(catalog),
        }
    }
}

fn format_field_error_human(error: &ValidationFieldError, explain: bool) -> String {
    let mut result = format!("{} ({}): {}", error.path, error.kind, error.message);
    if let Some(value) = &error.value {
        result.push_str(&format!("\n  value: {}", value));
    }
    if explain {
        result.push_str(&format!("\n  source: {:?}", error.source));
    }
    result
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if self.format == OutputFormat::Yaml {
            // serde_yaml already terminates with a newline
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write a transformed field error
    pub fn field_error(&mut self, error: &ValidationFieldError, explain: bool) -> Result<()> {
        let formatted = self.format.format_field_error(error, explain)?;
        if self.format == OutputFormat::Human && self.use_color {
            return self.writeln(&formatted.red().to_string());
        }
        self.emit(formatted)
    }

    /// Write an error that was not a validation failure
    pub fn passed_through(&mut self, error: &Value) -> Result<()> {
        self.info("Not a validation failure, passed through unchanged")?;
        self.data(error)
    }

    /// Write a message catalog
    pub fn catalog(&mut self, catalog: &MessageCatalog) -> Result<()> {
        let formatted = self.format.format_catalog(catalog)?;
        self.emit(formatted)
    }

    fn emit(&mut self, formatted: String) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmsg_core::{FailureKind, MessageSource};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn sample_error() -> ValidationFieldError {
        ValidationFieldError {
            path: "age".to_string(),
            kind: FailureKind::NumberMax,
            value: Some(json!(100)),
            message: "age must be greater than or equal to 60".to_string(),
            source: MessageSource::KindTemplate,
        }
    }

    fn writer(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let writer = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
        (writer, buffer)
    }

    #[test]
    fn test_field_error_human() {
        let (mut out, buffer) = writer(OutputFormat::Human);
        out.field_error(&sample_error(), true).unwrap();
        assert_eq!(
            buffer.contents(),
            "age (number.max): age must be greater than or equal to 60\n  value: 100\n  source: KindTemplate\n"
        );
    }

    #[test]
    fn test_human_formatter_matches_writer_output() {
        let formatted = OutputFormat::Human.format_field_error(&sample_error(), false).unwrap();
        assert_eq!(formatted, "age (number.max): age must be greater than or equal to 60\n  value: 100");

        let (mut out, buffer) = writer(OutputFormat::Human);
        out.field_error(&sample_error(), false).unwrap();
        assert_eq!(buffer.contents(), format!("{}\n", formatted));
    }

    #[test]
    fn test_field_error_json_has_stable_shape() {
        let (mut out, buffer) = writer(OutputFormat::Json);
        out.field_error(&sample_error(), true).unwrap();
        let parsed: Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(
            parsed,
            json!({
                "name": "ValidationFieldError",
                "path": "age",
                "kind": "number.max",
                "value": 100,
                "message": "age must be greater than or equal to 60"
            })
        );
    }

    #[test]
    fn test_field_error_yaml() {
        let (mut out, buffer) = writer(OutputFormat::Yaml);
        out.field_error(&sample_error(), false).unwrap();
        let contents = buffer.contents();
        assert!(contents.contains("name: ValidationFieldError"));
        assert!(contents.contains("kind: number.max"));
        assert!(contents.ends_with('\n') && !contents.ends_with("\n\n"));
    }

    #[test]
    fn test_pass_through_in_machine_format_is_verbatim() {
        let (mut out, buffer) = writer(OutputFormat::Json);
        let error = json!({"name": "SomethingElse", "code": 7});
        out.passed_through(&error).unwrap();
        let parsed: Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(parsed, error);
    }

    #[test]
    fn test_catalog_human_is_aligned() {
        let (mut out, buffer) = writer(OutputFormat::Human);
        out.catalog(&MessageCatalog::defaults()).unwrap();
        let contents = buffer.contents();
        assert_eq!(contents.lines().count(), 19);
        assert!(contents.contains("required    {path} is required"));
    }

    #[test]
    fn test_quiet_suppresses_info() {
        let buffer = SharedBuffer::default();
        let mut out = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
        out.info("hello").unwrap();
        assert!(buffer.contents().is_empty());
    }
}
