/*!
 * Reporting functionality for hiddendump
 *
 * Renders the end-of-run summary with the tabled library. The numbers come
 * straight from the scanner's counters.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::messages::Messages;
use crate::types::{FileContent, ScanResult, ScanStatistics};
use crate::utils::format_file_size;

/// Above this many files only the largest ones are listed
const MAX_LISTED_FILES: usize = 15;
const TOP_FILES: usize = 10;

/// Per-file line of the report
#[derive(Debug, Clone, Default)]
pub struct FileReportInfo {
    /// Relative path
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Number of lines
    pub lines: usize,
    /// Whether reading failed
    pub error: bool,
}

/// Statistics for a finished scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path, absent for dry runs
    pub output_file: Option<String>,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Scanner counters
    pub statistics: ScanStatistics,
    /// Details for each collected file
    pub file_details: Vec<FileReportInfo>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl ScanReport {
    /// Build a report from a scan result
    pub fn from_result(result: &ScanResult, output_file: Option<String>, duration: Duration) -> Self {
        let file_details = result
            .entries
            .iter()
            .map(|entry| FileReportInfo {
                path: entry.display_path(),
                size: entry.size,
                lines: entry.lines,
                error: matches!(entry.content, FileContent::Error(_)),
            })
            .collect();

        Self {
            output_file,
            duration,
            statistics: result.statistics.clone(),
            file_details,
            dry_run: result.dry_run,
        }
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
    messages: Messages,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat, messages: Messages) -> Self {
        Self { format, messages }
    }

    /// Generate a report string based on scan statistics
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let mut rows = Vec::new();

        if let Some(output) = &report.output_file {
            rows.push(SummaryRow {
                key: self.messages.output_file().to_string(),
                value: output.clone(),
            });
        }

        rows.push(SummaryRow {
            key: self.messages.process_time().to_string(),
            value: format!("{:.4?}", report.duration),
        });

        rows.push(SummaryRow {
            key: self.messages.files_processed().to_string(),
            value: stats.files_processed.to_string(),
        });

        rows.push(SummaryRow {
            key: self.messages.total_size().to_string(),
            value: format!(
                "{} ({})",
                stats.total_size,
                format_file_size(stats.total_size)
            ),
        });

        rows.push(SummaryRow {
            key: self.messages.total_lines().to_string(),
            value: stats.total_lines.to_string(),
        });

        rows.push(SummaryRow {
            key: self.messages.skipped().to_string(),
            value: format!("{} / {}", stats.skipped_large, stats.skipped_binary),
        });

        if stats.read_errors > 0 {
            rows.push(SummaryRow {
                key: self.messages.read_errors().to_string(),
                value: stats.read_errors.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create a files table using the tabled crate
    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let mut files: Vec<&FileReportInfo> = report.file_details.iter().collect();
        if files.len() > MAX_LISTED_FILES {
            files.sort_by(|a, b| b.size.cmp(&a.size));
            files.truncate(TOP_FILES);
        }

        let rows: Vec<FileRow> = files
            .iter()
            .map(|info| FileRow {
                path: info.path.clone(),
                lines: if info.error {
                    "-".to_string()
                } else {
                    info.lines.to_string()
                },
                size: format_file_size(info.size),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);
        let summary_title = if report.dry_run {
            format!("{}\n{}", self.messages.dry_run_header(), self.messages.summary())
        } else {
            self.messages.summary().to_string()
        };

        // Dry runs only report the aggregate counters
        if report.dry_run {
            return format!("{}\n{}", summary_title, summary_table);
        }

        let files_title = if report.file_details.len() > MAX_LISTED_FILES {
            self.messages.largest_files_title()
        } else {
            self.messages.processed_files_title()
        };
        let files_table = self.create_files_table(report);

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}
