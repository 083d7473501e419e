/*!
 * hiddendump - Collect the files a source view hides
 *
 * This library walks a project tree, picks dotfiles, build artifacts, logs,
 * lockfiles and config files, and writes their contents into a single
 * text, Markdown, JSON or SQLite dump.
 */

pub mod config;
pub mod error;
pub mod filters;
pub mod messages;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, FileFilter, OutputFormat};
pub use error::{HiddenDumpError, Result};
pub use filters::{is_excluded_path, is_hidden, is_included_directory, is_included_file, PatternSet};
pub use messages::{Language, Messages};
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport};
pub use scanner::Scanner;
pub use tree::TreeRenderer;
pub use types::{FileContent, FileEntry, PathDecision, ScanResult, ScanStatistics, SkipReason};
pub use utils::{format_file_size, parse_size};
pub use writer::DumpWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
