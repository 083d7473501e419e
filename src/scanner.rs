/*!
 * Directory scanning and content collection
 */

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{Config, FileFilter};
use crate::error::Result;
use crate::filters::{is_config_file, is_hidden, PatternSet};
use crate::messages::Messages;
use crate::tree::TreeRenderer;
use crate::types::{FileContent, FileEntry, ScanResult, ScanStatistics, SkipReason};
use crate::utils::{count_lines, is_binary_file};

/// Outcome of running a file through the gates
enum Gate {
    /// Not relevant, dropped silently
    Rejected(&'static str),
    /// Relevant but left out
    Skipped(SkipReason),
    /// Relevant, failed to inspect
    Failed(io::Error),
    /// Passed every gate
    Accepted { size: u64 },
}

/// Scanner for hidden and excluded-by-convention files
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Pattern set shared with the tree renderer
    patterns: PatternSet,
    /// Progress indicator
    pub progress: ProgressBar,
    messages: Messages,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: ProgressBar) -> Self {
        let patterns = config.patterns();
        let messages = Messages::new(config.lang);
        Self {
            config,
            patterns,
            progress,
            messages,
        }
    }

    /// Pattern set in effect for this scan
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Scan the target directory.
    ///
    /// Fails without doing any work when the root is not a directory.
    /// Per-file problems never fail the scan.
    pub fn scan(&self) -> Result<ScanResult> {
        self.config.validate()?;
        let root = fs::canonicalize(&self.config.target_dir)?;

        info!("{}", self.messages.analyzing(&root.display().to_string()));
        info!("{}", self.messages.included_types(&self.patterns.include_files));

        let tree = if self.config.dry_run {
            None
        } else {
            self.progress.set_message(self.messages.generating_tree());
            Some(TreeRenderer::new(&root, &self.patterns).render())
        };

        self.progress.set_message(self.messages.processing_files());
        let mut entries = Vec::new();
        let mut statistics = ScanStatistics::default();

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !e.file_type().is_dir() || self.should_descend(&root, e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            // Symlinks to directories are listed by the walk but never entered
            if entry.path_is_symlink() && entry.path().is_dir() {
                continue;
            }

            let rel = relative(&root, entry.path());
            if let Some(file) = self.process_file(entry.path(), &rel, &mut statistics) {
                entries.push(file);
            }
        }

        Ok(ScanResult {
            root,
            tree,
            entries,
            statistics,
            dry_run: self.config.dry_run,
        })
    }

    /// Directory pruning: exclude veto first, then relevance
    fn should_descend(&self, root: &Path, entry: &DirEntry) -> bool {
        let rel = relative(root, entry.path());
        let keep = self.patterns.admits_directory(entry.path(), &rel);
        if !keep {
            debug!("Pruned directory {}", rel.display());
        }
        keep
    }

    /// Apply the gates to one file, in order, stopping at the first rejection
    fn gate(&self, abs: &Path, rel: &Path) -> Gate {
        if self.patterns.is_excluded(abs) {
            return Gate::Rejected("excluded");
        }

        let name = rel
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let hidden = is_hidden(rel);

        let filtered_out = match self.config.file_filter {
            FileFilter::All => false,
            FileFilter::Dotfiles => !hidden,
            FileFilter::Config => !is_config_file(&name),
        };
        if filtered_out {
            return Gate::Rejected("file filter");
        }

        if !(self.patterns.is_included_file(&name) || hidden) {
            return Gate::Rejected("not relevant");
        }

        let size = match fs::metadata(abs) {
            Ok(metadata) => metadata.len(),
            Err(e) => return Gate::Failed(e),
        };
        if size > self.config.max_file_size {
            return Gate::Skipped(SkipReason::TooLarge {
                size,
                limit: self.config.max_file_size,
            });
        }

        match is_binary_file(abs) {
            Ok(true) => Gate::Skipped(SkipReason::Binary),
            Ok(false) => Gate::Accepted { size },
            Err(e) => Gate::Failed(e),
        }
    }

    /// Gate, read and account for a single file
    fn process_file(
        &self,
        abs: &Path,
        rel: &Path,
        stats: &mut ScanStatistics,
    ) -> Option<FileEntry> {
        let display = rel.display().to_string();

        let size = match self.gate(abs, rel) {
            Gate::Rejected(reason) => {
                trace!("Ignoring {} ({})", display, reason);
                return None;
            }
            Gate::Skipped(SkipReason::TooLarge { size, limit }) => {
                warn!("{}", self.messages.skip_large(&display, size, limit));
                stats.skipped_large += 1;
                return None;
            }
            Gate::Skipped(SkipReason::Binary) => {
                warn!("{}", self.messages.skip_binary(&display));
                stats.skipped_binary += 1;
                return None;
            }
            Gate::Failed(e) => return Some(self.read_error(rel, e, stats)),
            Gate::Accepted { size } => size,
        };

        info!("{}", self.messages.processing(&display));
        self.progress.set_message(self.messages.processing(&display));
        self.progress.inc(1);

        let read = if self.config.dry_run {
            self.count_only(abs, size)
        } else {
            self.read_content(abs)
        };

        match read {
            Ok(entry) => {
                stats.files_processed += 1;
                stats.total_size += entry.size;
                stats.total_lines += entry.lines;
                Some(FileEntry {
                    path: rel.to_path_buf(),
                    ..entry
                })
            }
            Err(e) => Some(self.read_error(rel, e, stats)),
        }
    }

    /// Read and decode a file, replacing invalid UTF-8
    fn read_content(&self, abs: &Path) -> io::Result<FileEntry> {
        let bytes = fs::read(abs)?;
        let lines = count_lines(bytes.as_slice())?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        Ok(FileEntry {
            path: PathBuf::new(),
            content: FileContent::Text(text),
            size: bytes.len() as u64,
            lines,
        })
    }

    /// Dry run: stream the file only to count its lines
    fn count_only(&self, abs: &Path, size: u64) -> io::Result<FileEntry> {
        let lines = count_lines(BufReader::new(File::open(abs)?))?;

        Ok(FileEntry {
            path: PathBuf::new(),
            content: FileContent::NotRead,
            size,
            lines,
        })
    }

    fn read_error(&self, rel: &Path, error: io::Error, stats: &mut ScanStatistics) -> FileEntry {
        warn!("Error reading {}: {}", rel.display(), error);
        stats.read_errors += 1;
        FileEntry {
            path: rel.to_path_buf(),
            content: FileContent::Error(error.to_string()),
            size: 0,
            lines: 0,
        }
    }
}

/// Path of `path` relative to `root`
fn relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
