/*!
 * Output writers for hiddendump
 *
 * Each format produces exactly one artifact named `hidden_dump.<ext>` in
 * the scanned root.
 */

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info};
use rusqlite::{params, Connection};
use serde_json::{Map, Value};

use crate::config::OutputFormat;
use crate::error::{Result, ResultExt};
use crate::types::ScanResult;

const RULE_WIDTH: usize = 50;

/// Writes a scan result in the configured format
pub struct DumpWriter {
    format: OutputFormat,
}

impl DumpWriter {
    /// Create a new writer
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Path of the artifact for a given scan root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(self.format.file_name())
    }

    /// Write the artifact and return its path
    pub fn write(&self, result: &ScanResult) -> Result<PathBuf> {
        crate::ensure!(
            !result.dry_run,
            InvalidArgument,
            "Dry run results have no content to write"
        );

        let path = self.output_path(&result.root);
        info!("Writing {} output to {}", self.format, path.display());

        match self.format {
            OutputFormat::Txt | OutputFormat::Md => {
                let text = render_text(result);
                fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            }
            OutputFormat::Json => write_json(result, &path)?,
            OutputFormat::Sqlite => write_sqlite(result, &path)?,
        }

        Ok(path)
    }
}

/// Render the text/Markdown dump
pub fn render_text(result: &ScanResult) -> String {
    let rule = format!("# {}", "=".repeat(RULE_WIDTH));
    let mut lines = vec![
        rule.clone(),
        format!("# Path: {}", result.root.display()),
        "# Hidden File Analysis".to_string(),
        format!("# Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
        rule,
        String::new(),
        "## DIRECTORY STRUCTURE".to_string(),
        "```".to_string(),
        result.tree.clone().unwrap_or_default(),
        "```".to_string(),
        String::new(),
        "## FILE CONTENTS".to_string(),
        String::new(),
    ];

    for entry in &result.entries {
        lines.push(format!("### {}", entry.display_path()));
        lines.push("```".to_string());
        lines.push(entry.content.as_output());
        lines.push("```".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Path to content mapping, in walk order
pub fn to_json(result: &ScanResult) -> Value {
    let map: Map<String, Value> = result
        .entries
        .iter()
        .map(|entry| (entry.display_path(), Value::String(entry.content.as_output())))
        .collect();
    Value::Object(map)
}

fn write_json(result: &ScanResult, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &to_json(result))?;
    writer.flush()?;
    Ok(())
}

fn write_sqlite(result: &ScanResult, path: &Path) -> Result<()> {
    if path.exists() {
        debug!("Replacing existing database {}", path.display());
        fs::remove_file(path).with_context(|| format!("removing {}", path.display()))?;
    }

    let mut conn = Connection::open(path)?;
    conn.execute(
        "CREATE TABLE files (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filepath TEXT NOT NULL,
            content TEXT NOT NULL
        )",
        [],
    )?;

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO files (filepath, content) VALUES (?1, ?2)")?;
        for entry in &result.entries {
            stmt.execute(params![entry.display_path(), entry.content.as_output()])?;
        }
    }
    tx.commit()?;
    Ok(())
}
