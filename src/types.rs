/*!
 * Core types and data structures for the hiddendump application
 */

use std::path::PathBuf;

/// Classification of a single path against a pattern set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDecision {
    /// Vetoed by an exclude pattern, never walked
    Excluded,
    /// A segment of the path starts with a dot
    Hidden,
    /// Matched an include directory or file pattern
    PatternMatch,
    /// Neither hidden nor matched
    NotIncluded,
}

impl PathDecision {
    /// Whether the path qualifies for traversal or collection
    pub fn is_included(self) -> bool {
        matches!(self, Self::Hidden | Self::PatternMatch)
    }
}

/// Why a relevant file was left out of the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File is larger than the configured maximum
    TooLarge { size: u64, limit: u64 },
    /// Content sample looks binary
    Binary,
}

/// Content recorded for a collected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded text, invalid UTF-8 replaced
    Text(String),
    /// Placeholder for a file that failed to read after gating
    Error(String),
    /// Dry run: counted, content not kept
    NotRead,
}

impl FileContent {
    /// Text written to output artifacts for this entry
    pub fn as_output(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Error(reason) => format!("# Error reading file: {}", reason),
            Self::NotRead => String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// A file that passed every gate
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the scan root
    pub path: PathBuf,
    /// Content or error placeholder
    pub content: FileContent,
    /// Size in bytes (0 for error entries)
    pub size: u64,
    /// Number of lines (0 for error entries)
    pub lines: usize,
}

impl FileEntry {
    /// Relative path as displayed in output artifacts
    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

/// Aggregate counters for one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Files read (or counted in a dry run)
    pub files_processed: usize,
    /// Sum of processed file sizes in bytes
    pub total_size: u64,
    /// Sum of processed file line counts
    pub total_lines: usize,
    /// Files skipped by the size gate
    pub skipped_large: usize,
    /// Files skipped by the binary gate
    pub skipped_binary: usize,
    /// Files that failed to read after gating
    pub read_errors: usize,
}

/// Everything collected by one scan, consumed by a writer
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Absolute scan root
    pub root: PathBuf,
    /// Rendered directory tree, absent in a dry run
    pub tree: Option<String>,
    /// Collected files in walk order
    pub entries: Vec<FileEntry>,
    /// Aggregate counters
    pub statistics: ScanStatistics,
    /// Whether the scan was a dry run
    pub dry_run: bool,
}
