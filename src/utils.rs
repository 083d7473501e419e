/*!
 * Utility functions for hiddendump
 */

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Maximum number of bytes sampled for binary detection
pub const BINARY_SAMPLE_SIZE: usize = 1024;

/// Minimum share of printable bytes for a sample to count as text
const PRINTABLE_RATIO: f64 = 0.7;

/// Default maximum file size (100 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Parse a size such as `512`, `100K`, `10M` or `1g` into bytes.
///
/// Suffixes are binary multiples and case-insensitive.
pub fn parse_size(input: &str) -> Result<u64, String> {
    let upper = input.trim().to_uppercase();
    let (digits, multiplier) = match upper.chars().last() {
        Some('G') => (&upper[..upper.len() - 1], 1024 * 1024 * 1024),
        Some('M') => (&upper[..upper.len() - 1], 1024 * 1024),
        Some('K') => (&upper[..upper.len() - 1], 1024),
        _ => (upper.as_str(), 1),
    };

    let value: u64 = digits
        .trim()
        .parse()
        .map_err(|_| format!("invalid size '{}': expected a number with optional K, M or G suffix", input))?;

    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size '{}' is too large", input))
}

fn is_printable(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b) || (byte >= 0x20 && byte != 0x7f)
}

/// Classify a content sample as binary.
///
/// Any NUL byte makes it binary; otherwise at least 70% of the bytes must be
/// printable. An empty sample is text.
pub fn is_binary_sample(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }
    let printable = sample.iter().filter(|&&b| is_printable(b)).count();
    (printable as f64 / sample.len() as f64) < PRINTABLE_RATIO
}

/// Sample the head of a file and classify it
pub fn is_binary_file(path: &Path) -> io::Result<bool> {
    let file = File::open(path)?;
    let mut sample = Vec::with_capacity(BINARY_SAMPLE_SIZE);
    file.take(BINARY_SAMPLE_SIZE as u64).read_to_end(&mut sample)?;
    Ok(is_binary_sample(&sample))
}

/// Count lines the way a line reader yields them.
///
/// A trailing segment without a newline counts as a line, so `"a\nb"` and
/// `"a\nb\n"` both have two lines and an empty input has none.
pub fn count_lines<R: Read>(mut reader: R) -> io::Result<usize> {
    let mut buffer = [0u8; 8192];
    let mut lines = 0;
    let mut last = None;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        lines += buffer[..n].iter().filter(|&&b| b == b'\n').count();
        last = Some(buffer[n - 1]);
    }

    match last {
        Some(b'\n') | None => Ok(lines),
        Some(_) => Ok(lines + 1),
    }
}
