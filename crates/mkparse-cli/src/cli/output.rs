//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for parse results.

use crate::cli::files::{FileOutcome, FileReport};
use colored::Colorize;
use mkparse_core::parse::Ast;
use serde::Serialize;
use std::io::Write;

/// JSON record for one file.
#[derive(Debug, Serialize)]
pub struct JsonFileRecord<'a> {
    /// Path of the file.
    pub file: String,
    /// Nodes parsed (partial if `error` is set).
    pub nodes: &'a [Ast],
    /// The failure, if any.
    pub error: Option<JsonError>,
}

/// A failure in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonError {
    /// Line number of the failing line, absent for read failures.
    pub line: Option<usize>,
    /// Human-readable message.
    pub message: String,
}

impl<'a> From<&'a FileReport> for JsonFileRecord<'a> {
    fn from(report: &'a FileReport) -> Self {
        let (nodes, line) = match &report.outcome {
            FileOutcome::Parsed(result) => (
                result.ast.asts.as_slice(),
                result.error.as_ref().map(|e| e.line()),
            ),
            FileOutcome::Unreadable(_) => (&[][..], None),
        };
        Self {
            file: report.path.display().to_string(),
            nodes,
            error: report
                .failure_message()
                .map(|message| JsonError { line, message }),
        }
    }
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes the one-line summary for a file.
    pub fn write_file_summary(&mut self, report: &FileReport) -> std::io::Result<()> {
        let name = report.path.display().to_string();
        let name = if self.use_colors {
            name.cyan().bold().to_string()
        } else {
            name
        };

        if let Some(result) = report.parsed() {
            let ast = &result.ast;
            writeln!(
                self.writer,
                "{}: {} node(s) ({} rule(s), {} assignment(s), {} command(s))",
                name,
                ast.len(),
                ast.rules().count(),
                ast.assignments().count(),
                ast.commands().count()
            )?;
        } else {
            writeln!(self.writer, "{}:", name)?;
        }

        if let Some(message) = report.failure_message() {
            if self.use_colors {
                writeln!(self.writer, "  {} {}", "[ERROR]".red().bold(), message)?;
            } else {
                writeln!(self.writer, "  [ERROR] {}", message)?;
            }
        }

        Ok(())
    }

    /// Writes every node of a file, one per line.
    pub fn write_nodes(&mut self, report: &FileReport) -> std::io::Result<()> {
        let Some(result) = report.parsed() else {
            return Ok(());
        };

        for ast in &result.ast.asts {
            let text = match ast {
                Ast::Command(command) => command.expr.to_string(),
                other => other.to_string(),
            };
            let kind = format!("{:<7}", ast.kind_name());
            if self.use_colors {
                writeln!(self.writer, "  {} {} {}", ast.loc().to_string().dimmed(), kind.yellow(), text)?;
            } else {
                writeln!(self.writer, "  {} {} {}", ast.loc(), kind, text)?;
            }
        }

        Ok(())
    }

    /// Writes a summary of all files.
    pub fn write_summary(&mut self, total_files: usize, failed_files: usize) -> std::io::Result<()> {
        writeln!(self.writer)?;

        if failed_files == 0 {
            let message = format!("✓ Parsed {} file(s)", total_files);
            if self.use_colors {
                writeln!(self.writer, "{}", message.green().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        } else {
            let message = format!("✗ {} of {} file(s) failed", failed_files, total_files);
            if self.use_colors {
                writeln!(self.writer, "{}", message.red().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        }

        Ok(())
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)?;
        } else {
            writeln!(self.writer, "Error: {}", message)?;
        }
        Ok(())
    }
}

/// Collects the reports of every parsed file, in input order.
#[derive(Debug, Default)]
pub struct ParseReports {
    reports: Vec<FileReport>,
}

impl ParseReports {
    /// Creates a collection from reports.
    pub fn new(reports: Vec<FileReport>) -> Self {
        Self { reports }
    }

    /// Returns the number of files.
    pub fn total_files(&self) -> usize {
        self.reports.len()
    }

    /// Returns the number of files that could not be read or parsed.
    pub fn failed_files(&self) -> usize {
        self.reports.iter().filter(|r| r.has_failure()).count()
    }

    /// Returns the total number of nodes across all files.
    pub fn total_nodes(&self) -> usize {
        self.reports
            .iter()
            .filter_map(FileReport::parsed)
            .map(|r| r.ast.len())
            .sum()
    }

    /// Returns true if any file failed.
    pub fn has_failures(&self) -> bool {
        self.reports.iter().any(FileReport::has_failure)
    }

    /// Iterates over reports in order.
    pub fn iter(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter()
    }

    /// Writes results in human-readable format.
    pub fn write_human<W: Write>(
        &self,
        writer: &mut W,
        use_colors: bool,
        dump: bool,
    ) -> std::io::Result<()> {
        let mut output = HumanOutput::new(writer, use_colors);

        for report in self.iter() {
            output.write_file_summary(report)?;
            if dump {
                output.write_nodes(report)?;
            }
        }

        output.write_summary(self.total_files(), self.failed_files())?;

        Ok(())
    }

    /// Writes results in JSON format.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let records: Vec<JsonFileRecord<'_>> = self.iter().map(JsonFileRecord::from).collect();
        let json = serde_json::to_string_pretty(&records).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}
