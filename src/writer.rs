/*!
 * Resource persistence under the download root
 */

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{GopherdexError, Result};
use crate::logger;
use crate::utils::safe_file_path;

/// Remove the Gopher end-of-text marker from a type-0 payload, if present.
///
/// Servers that terminate text resources append a line containing a single
/// `.`; after line reassembly that shows up as a trailing `.\n` or a lone
/// trailing `.`.
pub fn strip_terminator(text: &str) -> &str {
    if let Some(stripped) = text.strip_suffix(".\n") {
        stripped
    } else if let Some(stripped) = text.strip_suffix('.') {
        stripped
    } else {
        text
    }
}

/// Writes fetched payloads to sanitized paths under the configured
/// download root.
pub struct ResourceWriter {
    config: Config,
}

impl ResourceWriter {
    /// Create a new resource writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Persist a text payload. Returns the on-disk size, or 0 on failure.
    pub fn write_text(&self, data: &str, full_path: &str) -> u64 {
        self.write(data.as_bytes(), full_path)
    }

    /// Persist a binary payload byte-exact. Returns the on-disk size, or 0
    /// on failure.
    pub fn write_binary(&self, data: &[u8], full_path: &str) -> u64 {
        self.write(data, full_path)
    }

    fn write(&self, data: &[u8], full_path: &str) -> u64 {
        match self.try_write(data, full_path) {
            Ok(size) => size,
            Err(err) => {
                logger::severe(err.to_string());
                0
            }
        }
    }

    fn try_write(&self, data: &[u8], full_path: &str) -> Result<u64> {
        let path = safe_file_path(full_path, &self.config.download_dir);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| write_error(&path, source))?;
        }
        fs::write(&path, data).map_err(|source| write_error(&path, source))?;

        let size = fs::metadata(&path)
            .map_err(|source| write_error(&path, source))?
            .len();
        Ok(size)
    }
}

fn write_error(path: &Path, source: std::io::Error) -> GopherdexError {
    GopherdexError::Write {
        path: path.display().to_string(),
        source,
    }
}
