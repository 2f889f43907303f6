/*!
 * Gopherdex - Recursive Gopher crawler and indexer
 *
 * This library walks a Gopher server's menu tree depth-first, downloads
 * every referenced text and binary resource to local storage, probes
 * external server references without descending into them, and aggregates
 * statistics over the traversal.
 */

pub mod config;
pub mod error;
pub mod indexer;
pub mod logger;
pub mod menu;
pub mod net;
pub mod report;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::Config;
pub use error::{GopherdexError, Result};
pub use indexer::{CrawlStats, Indexer};
pub use menu::{parse_menu, ItemType, MenuEntry};
pub use net::Connection;
pub use report::{CrawlReport, ReportFormat, Reporter};
pub use utils::{format_file_size, safe_file_path};
pub use writer::ResourceWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
