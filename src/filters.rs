/*!
 * Path classification rules shared by the tree renderer and the scanner
 *
 * Every decision about whether a path is pruned, shown or collected goes
 * through this module. Nothing here touches the filesystem.
 */

use std::collections::BTreeSet;
use std::path::{Component, Path};

use once_cell::sync::Lazy;

use crate::types::PathDecision;

/// Directories and path fragments that are never walked
pub static DEFAULT_EXCLUDE_PATTERNS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        // Linux system folders
        "/proc",
        "/sys",
        "/dev",
        // Common large directories
        "node_modules",
        ".git",
        "__pycache__",
        "venv",
        ".venv",
        ".cache",
        // Build artifacts
        "build",
        "dist",
        "target",
    ])
});

/// Directory names that qualify a subtree for traversal
pub static INCLUDE_DIRS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        // Build artifacts
        "dist",
        "build",
        "target",
        "out",
        "bin",
        "obj",
        "generated",
        // Framework build folders
        ".next",
        ".nuxt",
        ".angular",
        ".expo",
        // Logs
        "logs",
        "log",
        // Temp
        "temp",
        "tmp",
        ".tmp",
        // Editors
        ".vscode",
        ".idea",
        ".vs",
        // Version control metadata
        ".git",
        ".svn",
        ".hg",
        // Virtual environments
        ".venv",
        "venv",
        "env",
        ".env",
        "__pycache__",
        // CI/CD
        ".github",
        ".gitlab",
        ".circleci",
        // Docker
        ".docker",
        "docker",
        // Database
        "db",
        "database",
        "sqlite",
    ])
});

/// File name patterns that qualify a file for collection
pub static INCLUDE_FILES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        // Logs
        "*.log",
        "*.log.*",
        "*.out",
        // Configuration
        ".env",
        ".env.*",
        "*.env",
        "*.env.*",
        "*.ini",
        "*.toml",
        "*.conf",
        "*.theme",
        ".gitignore",
        ".gitconfig",
        ".editorconfig",
        // Lockfiles
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "composer.lock",
        "poetry.lock",
        "Cargo.lock",
        // Compiled artifacts
        "*.pyc",
        "*.pyo",
        "*.pyd",
        "*.class",
        "*.o",
        "*.so",
        "*.dll",
        "*.exe",
        "*.dylib",
        "*.a",
        // OS caches
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        // Backups
        "*.bak",
        "*.swp",
        "*.swo",
        // Coverage
        "coverage/",
        ".coverage",
        // Shell and tool rc files
        ".bashrc",
        ".zshrc",
        ".profile",
        ".vimrc",
        ".eslintrc",
        ".prettierrc",
    ])
});

/// Patterns accepted by the `config` file filter
pub static CONFIG_FILE_PATTERNS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    BTreeSet::from([
        ".env", ".env.*", "*.env", "*.env.*", "*.ini", "*.toml", "*.yaml", "*.yml", "*.json",
        "*.xml",
    ])
});

/// Normal path segments, skipping root, prefix and `.`/`..` components
fn segments(path: &Path) -> impl Iterator<Item = std::borrow::Cow<'_, str>> {
    path.components().filter_map(|c| match c {
        Component::Normal(s) => Some(s.to_string_lossy()),
        _ => None,
    })
}

/// Check whether a path is vetoed by an exclude pattern.
///
/// A pattern matches when it occurs anywhere in the full path string or
/// equals one of its segments. Matching is case-sensitive.
pub fn is_excluded_path<I, S>(path: &Path, patterns: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path_str = path.to_string_lossy();
    patterns.into_iter().any(|pattern| {
        let pattern = pattern.as_ref();
        path_str.contains(pattern) || segments(path).any(|part| part == pattern)
    })
}

/// Check whether any segment of `path`, lower-cased, is an include directory
pub fn is_included_directory<I, S>(path: &Path, include_dirs: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = segments(path).map(|p| p.to_lowercase()).collect();
    include_dirs
        .into_iter()
        .any(|dir| parts.iter().any(|part| part == dir.as_ref()))
}

/// Check a bare file name against include patterns, case-insensitively.
///
/// Rules per pattern, first hit wins: exact match, `*.ext` suffix match,
/// then `prefix/` which is a prefix match on the file name.
pub fn is_included_file<I, S>(filename: &str, patterns: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let filename = filename.to_lowercase();

    patterns.into_iter().any(|pattern| {
        let pattern = pattern.as_ref().to_lowercase();

        if filename == pattern {
            return true;
        }
        if let Some(suffix) = pattern.strip_prefix('*') {
            if suffix.starts_with('.') && filename.ends_with(suffix) {
                return true;
            }
        }
        if let Some(prefix) = pattern.strip_suffix('/') {
            if filename.starts_with(prefix) {
                return true;
            }
        }
        false
    })
}

/// Check whether any segment of `path` starts with a dot
pub fn is_hidden(path: &Path) -> bool {
    segments(path).any(|part| part.starts_with('.'))
}

/// Check a file name against the fixed configuration-file patterns
pub fn is_config_file(filename: &str) -> bool {
    is_included_file(filename, CONFIG_FILE_PATTERNS.iter())
}

/// Pattern sets in effect for one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    /// Substrings / segments that prune traversal
    pub exclude: BTreeSet<String>,
    /// Directory names that allow traversal
    pub include_dirs: BTreeSet<String>,
    /// File name patterns that allow collection
    pub include_files: BTreeSet<String>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::with_excludes(std::iter::empty::<String>())
    }
}

impl PatternSet {
    /// Default sets extended with extra exclude patterns.
    ///
    /// The static defaults are copied, never modified.
    pub fn with_excludes<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut exclude: BTreeSet<String> =
            DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect();
        exclude.extend(extra.into_iter().map(Into::into));

        Self {
            exclude,
            include_dirs: INCLUDE_DIRS.iter().map(|p| p.to_string()).collect(),
            include_files: INCLUDE_FILES.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        is_excluded_path(path, &self.exclude)
    }

    pub fn is_included_directory(&self, path: &Path) -> bool {
        is_included_directory(path, &self.include_dirs)
    }

    pub fn is_included_file(&self, filename: &str) -> bool {
        is_included_file(filename, &self.include_files)
    }

    /// Whether a directory is walked.
    ///
    /// `abs` is checked against exclude patterns, `rel` (relative to the
    /// scan root) against include directories and hidden segments.
    pub fn admits_directory(&self, abs: &Path, rel: &Path) -> bool {
        self.decide(abs, rel, true).is_included()
    }

    /// Whether a file is relevant, before any filter-mode or content gates
    pub fn admits_file(&self, abs: &Path, rel: &Path) -> bool {
        self.decide(abs, rel, false).is_included()
    }

    /// Classify a path without touching the filesystem
    pub fn decide(&self, abs: &Path, rel: &Path, is_dir: bool) -> PathDecision {
        if self.is_excluded(abs) {
            return PathDecision::Excluded;
        }
        if is_hidden(rel) {
            return PathDecision::Hidden;
        }
        let matched = if is_dir {
            self.is_included_directory(rel)
        } else {
            let name = rel
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            self.is_included_file(&name)
        };
        if matched {
            PathDecision::PatternMatch
        } else {
            PathDecision::NotIncluded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new(".env")));
        assert!(is_hidden(Path::new("a/.config/b/c.txt")));
        assert!(is_hidden(Path::new("/home/user/.ssh")));
        assert!(!is_hidden(Path::new("src/main.rs")));
        // `.` and `..` components are not names
        assert!(!is_hidden(Path::new("./src/main.rs")));
        assert!(!is_hidden(Path::new("../src")));
        assert!(!is_hidden(Path::new("")));
    }

    #[test]
    fn test_is_excluded_path() {
        let set = PatternSet::default();
        assert!(set.is_excluded(Path::new("/repo/node_modules/pkg/.secret")));
        assert!(set.is_excluded(Path::new("/proc/1/status")));
        assert!(set.is_excluded(Path::new("/repo/.git")));
        // substring match is intentionally blunt
        assert!(set.is_excluded(Path::new("/repo/distribution")));
        assert!(set.is_excluded(Path::new("/repo/.github/workflows")));
        assert!(!set.is_excluded(Path::new("/repo/.vscode/settings.json")));
        assert!(!set.is_excluded(Path::new("/repo/src")));
        // case-sensitive
        assert!(!set.is_excluded(Path::new("/repo/Node_Modules")));
    }

    #[test]
    fn test_is_excluded_by_segment() {
        let patterns = ["cache"];
        assert!(is_excluded_path(Path::new("a/cache/b"), patterns));
        assert!(!is_excluded_path(Path::new("a/b"), patterns));
    }

    #[test]
    fn test_is_included_directory() {
        let set = PatternSet::default();
        assert!(set.is_included_directory(Path::new("project/Logs")));
        assert!(set.is_included_directory(Path::new("a/docker/b")));
        assert!(!set.is_included_directory(Path::new("src/logic")));
    }

    #[test]
    fn test_is_included_file_rules() {
        let set = PatternSet::default();
        // exact, case-insensitive
        assert!(set.is_included_file(".gitignore"));
        assert!(set.is_included_file("cargo.lock"));
        assert!(set.is_included_file(".DS_STORE"));
        // suffix
        assert!(set.is_included_file("server.LOG"));
        assert!(set.is_included_file("pyproject.toml"));
        assert!(set.is_included_file("prod.env"));
        // `coverage/` is a prefix match on file names
        assert!(set.is_included_file("coverage-final.json"));
        assert!(set.is_included_file("coverage"));
        assert!(!set.is_included_file("README.md"));
        assert!(!set.is_included_file("main.rs"));
    }

    #[test]
    fn test_star_pattern_without_dot_is_not_a_suffix_rule() {
        assert!(!is_included_file("abc", ["*c"]));
        assert!(is_included_file("*c", ["*c"]));
    }

    #[test]
    fn test_is_config_file() {
        assert!(is_config_file(".env"));
        assert!(is_config_file("prod.env"));
        // `.env.*` is compared literally, it is not a wildcard
        assert!(!is_config_file(".env.local"));
        assert!(is_config_file("settings.YAML"));
        assert!(is_config_file("package.json"));
        assert!(!is_config_file("app.log"));
        assert!(!is_config_file(".bashrc"));
    }

    #[test]
    fn test_with_excludes_keeps_defaults() {
        let set = PatternSet::with_excludes(["secrets", "build"]);
        assert!(set.exclude.contains("secrets"));
        assert_eq!(set.exclude.len(), DEFAULT_EXCLUDE_PATTERNS.len() + 1);
        assert!(!DEFAULT_EXCLUDE_PATTERNS.contains("secrets"));
    }

    #[test]
    fn test_decide() {
        let set = PatternSet::default();
        let root = PathBuf::from("/repo");
        let check = |rel: &str, is_dir| set.decide(&root.join(rel), Path::new(rel), is_dir);

        assert_eq!(check("node_modules", true), PathDecision::Excluded);
        assert_eq!(check(".vscode", true), PathDecision::Hidden);
        assert_eq!(check("logs", true), PathDecision::PatternMatch);
        assert_eq!(check("src", true), PathDecision::NotIncluded);
        assert_eq!(check("logs/app.log", false), PathDecision::PatternMatch);
        assert_eq!(check("logs/notes.md", false), PathDecision::NotIncluded);
        assert_eq!(check(".config/README", false), PathDecision::Hidden);
    }

    #[test]
    fn test_admits_uses_relative_path_for_hidden() {
        let set = PatternSet::default();
        let abs = Path::new("/tmp/.scratch/project/README.md");
        assert!(!set.admits_file(abs, Path::new("README.md")));
        assert!(set.admits_file(abs, Path::new(".config/README.md")));
    }

    #[test]
    fn test_admits_follows_decision() {
        let set = PatternSet::with_excludes([".private"]);
        let root = Path::new("/repo");

        assert!(!set.admits_directory(&root.join("node_modules"), Path::new("node_modules")));
        assert!(!set.admits_directory(&root.join(".private"), Path::new(".private")));
        assert!(set.admits_directory(&root.join(".vscode"), Path::new(".vscode")));
        assert!(set.admits_directory(&root.join("logs"), Path::new("logs")));
        assert!(!set.admits_directory(&root.join("src"), Path::new("src")));
        assert!(!set.admits_file(&root.join(".private/.env"), Path::new(".private/.env")));
        assert!(set.admits_file(&root.join("Cargo.lock"), Path::new("Cargo.lock")));
    }
}
