/*!
 * Directory tree rendering
 *
 * Produces the `DIRECTORY STRUCTURE` block of text dumps. The walk uses the
 * same `PatternSet` predicates as the scanner, so the tree never shows a
 * directory the scanner would refuse to enter.
 */

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::filters::PatternSet;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Placeholder line for a directory that could not be listed
pub const PERMISSION_DENIED: &str = "[Permission Denied]";

/// Renders the relevant part of a directory tree as text
pub struct TreeRenderer<'a> {
    root: &'a Path,
    patterns: &'a PatternSet,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer for `root` using the given pattern set
    pub fn new(root: &'a Path, patterns: &'a PatternSet) -> Self {
        Self { root, patterns }
    }

    /// Render the tree. The first line is always the root's name plus `/`.
    pub fn render(&self) -> String {
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut lines = vec![format!("{}/", name)];
        self.render_directory(self.root, "", &mut lines);
        lines.join("\n")
    }

    /// Append the lines for the children of `dir`, depth first
    fn render_directory(&self, dir: &Path, prefix: &str, lines: &mut Vec<String>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                lines.push(format!("{}{}{}", prefix, BRANCH, PERMISSION_DENIED));
                return;
            }
            Err(e) => {
                warn!("Cannot list {}: {}", dir.display(), e);
                return;
            }
        };

        let mut children: Vec<fs::DirEntry> = entries.filter_map(Result::ok).collect();
        children.sort_by_key(|e| e.file_name());

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for child in children {
            let abs = child.path();
            let rel = abs.strip_prefix(self.root).unwrap_or(&abs).to_path_buf();
            let name = child.file_name().to_string_lossy().into_owned();
            if abs.is_dir() {
                if self.patterns.admits_directory(&abs, &rel) {
                    dirs.push((name, abs));
                } else {
                    debug!("Tree skips directory {}", rel.display());
                }
            } else if abs.is_file() && self.patterns.admits_file(&abs, &rel) {
                files.push(name);
            }
        }

        let dir_count = dirs.len();
        for (i, (name, abs)) in dirs.into_iter().enumerate() {
            let is_last = i + 1 == dir_count && files.is_empty();
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            lines.push(format!("{}{}{}/", prefix, connector, name));

            // Symlinked directories are shown but not entered
            let is_link = fs::symlink_metadata(&abs)
                .map(|m| m.file_type().is_symlink())
                .unwrap_or(false);
            if !is_link {
                let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
                self.render_directory(&abs, &child_prefix, lines);
            }
        }

        let file_count = files.len();
        for (i, name) in files.into_iter().enumerate() {
            let connector = if i + 1 == file_count { LAST_BRANCH } else { BRANCH };
            lines.push(format!("{}{}{}", prefix, connector, name));
        }
    }
}
