/*!
 * Configuration handling for hiddendump
 */

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;
use strum::{Display, EnumIter};

use crate::error::Result;
use crate::filters::PatternSet;
use crate::messages::Language;
use crate::utils::{parse_size, DEFAULT_MAX_FILE_SIZE};

/// Base name of every output artifact
pub const OUTPUT_BASE_NAME: &str = "hidden_dump";

/// Encoding of the output artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text dump with tree and fenced file contents
    #[default]
    Txt,
    /// Same layout as txt, `.md` extension
    Md,
    /// Object mapping relative path to content
    Json,
    /// SQLite database with one row per file
    Sqlite,
}

impl OutputFormat {
    /// File extension of the artifact
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Json => "json",
            Self::Sqlite => "db",
        }
    }

    /// Artifact file name, e.g. `hidden_dump.txt`
    pub fn file_name(self) -> String {
        format!("{}.{}", OUTPUT_BASE_NAME, self.extension())
    }
}

/// Which relevant files are collected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FileFilter {
    /// Every hidden or pattern-matched file
    #[default]
    All,
    /// Only files with a hidden path segment
    Dotfiles,
    /// Only files matching the configuration patterns
    Config,
}

/// Command-line arguments for hiddendump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "hiddendump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Collect hidden files, build artifacts and config files into a single dump",
    long_about = "Walks a project tree, picks the files a source browser or .gitignore would hide (dotfiles, logs, lockfiles, config files) and writes their contents to hidden_dump.<ext> beside the project."
)]
pub struct Args {
    /// Project path to analyze
    #[clap(default_value = ".")]
    pub path: String,

    /// Language for output messages
    #[clap(long, value_enum, default_value_t = Language::default())]
    pub lang: Language,

    /// Additional exclude pattern (can be used multiple times)
    #[clap(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Only count the files that would be processed, write nothing
    #[clap(long)]
    pub dry_run: bool,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    /// Maximum file size to process (e.g. 10M, 100K)
    #[clap(long, value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// File filtering mode
    #[clap(long, value_enum, default_value_t = FileFilter::default())]
    pub filter: FileFilter,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence log output
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub target_dir: PathBuf,

    /// Exclude patterns, defaults plus user additions
    pub exclude_patterns: BTreeSet<String>,

    /// Files larger than this many bytes are skipped
    pub max_file_size: u64,

    /// File filtering mode
    pub file_filter: FileFilter,

    /// Count only, write nothing
    pub dry_run: bool,

    /// Output format
    pub output_format: OutputFormat,

    /// Language for console messages
    pub lang: Language,
}

impl Config {
    /// Default configuration for scanning `target_dir`
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            exclude_patterns: PatternSet::default().exclude,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            file_filter: FileFilter::All,
            dry_run: false,
            output_format: OutputFormat::Txt,
            lang: Language::En,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let path = PathBuf::from(&args.path);
        // Keep the raw path when it does not exist so validation can report it
        let target_dir = fs::canonicalize(&path).unwrap_or(path);

        Self {
            target_dir,
            exclude_patterns: PatternSet::with_excludes(args.exclude).exclude,
            max_file_size: args.max_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
            file_filter: args.filter,
            dry_run: args.dry_run,
            output_format: args.format,
            lang: args.lang,
        }
    }

    /// Pattern set used by both the tree renderer and the scanner
    pub fn patterns(&self) -> PatternSet {
        PatternSet {
            exclude: self.exclude_patterns.clone(),
            ..PatternSet::default()
        }
    }

    /// Path of the artifact written for this configuration
    pub fn output_path(&self) -> PathBuf {
        self.target_dir.join(self.output_format.file_name())
    }

    /// Whether the target is the filesystem root
    pub fn targets_filesystem_root(&self) -> bool {
        self.target_dir == Path::new("/")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );
        Ok(())
    }
}
