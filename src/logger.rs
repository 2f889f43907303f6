//! Colored stdout logging
//!
//! Three sinks, one per severity. Every line carries an ANSI color prefix
//! and a local timestamp so crawl events can be traced chronologically.

use chrono::Local;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Log an informational message (successful operations, progress).
pub fn info(msg: impl AsRef<str>) {
    println!("{GREEN}INFO: {} {}{RESET}", timestamp(), msg.as_ref());
}

/// Log a warning (malformed input, unexpected but recoverable behavior).
pub fn warning(msg: impl AsRef<str>) {
    println!("{YELLOW}WARNING: {} {}{RESET}", timestamp(), msg.as_ref());
}

/// Log a severe failure (I/O errors, unparseable data).
pub fn severe(msg: impl AsRef<str>) {
    println!("{RED}SEVERE: {} {}{RESET}", timestamp(), msg.as_ref());
}
