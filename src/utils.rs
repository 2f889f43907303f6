/*!
 * Utility functions for gopherdex
 */

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Longest file basename the sanitizer will emit
pub const MAX_FILENAME_LENGTH: usize = 63;

/// Number of hex characters of the SHA-256 digest appended to truncated names
const HASH_SUFFIX_LENGTH: usize = 8;

/// Map an arbitrary resource path to a collision-resistant local file path
/// under `download_dir`.
///
/// Every character outside `[A-Za-z0-9.-]` is replaced with `_`, which keeps
/// the name portable and free of separators whatever the remote selector
/// contains. Names longer than [`MAX_FILENAME_LENGTH`] are truncated and get
/// the first eight hex characters of the SHA-256 digest of the original path
/// appended (before the extension, which is preserved) so distinct long
/// paths cannot collide.
pub fn safe_file_path(full_path: &str, download_dir: &Path) -> PathBuf {
    let safe: String = full_path
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe.len() <= MAX_FILENAME_LENGTH {
        return download_dir.join(safe);
    }

    // A dot at position 0 is a hidden-file marker, not an extension.
    let (stem, extension) = match safe.rfind('.') {
        Some(idx) if idx > 0 => safe.split_at(idx),
        _ => (safe.as_str(), ""),
    };
    // An "extension" that would not fit next to the hash is not one.
    let extension = if HASH_SUFFIX_LENGTH + extension.len() >= MAX_FILENAME_LENGTH {
        ""
    } else {
        extension
    };

    let digest = Sha256::digest(full_path.as_bytes());
    let hash: String = digest
        .iter()
        .take(HASH_SUFFIX_LENGTH / 2)
        .map(|b| format!("{b:02x}"))
        .collect();

    // The projection above leaves pure ASCII, so byte indexing is char-safe.
    let budget = MAX_FILENAME_LENGTH.saturating_sub(hash.len() + extension.len());
    let stem = &stem[..stem.len().min(budget)];

    download_dir.join(format!("{stem}{hash}{extension}"))
}

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
