/*!
 * Recursive traversal engine
 *
 * Walks the origin server's menu tree depth-first, in menu order. Text and
 * binary entries are fetched over fresh connections and persisted; type-1
 * entries on the origin recurse while entries on other servers are probed
 * for liveness and never descended into.
 */

use std::collections::HashSet;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::config::Config;
use crate::logger;
use crate::menu::{self, ItemType, MenuEntry};
use crate::net::Connection;
use crate::writer::{strip_terminator, ResourceWriter};

/// Running statistics over a crawl. Single writer: the indexer.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// Full paths of text files fetched and persisted, in traversal order
    pub text_files: Vec<String>,
    /// Full paths of binary files fetched and persisted, in traversal order
    pub binary_files: Vec<String>,
    /// Full paths of text entries whose fetch came back empty or failed
    pub bad_text_files: Vec<String>,
    /// Full paths of binary entries whose fetch failed
    pub bad_binary_files: Vec<String>,
    /// `host:port` of external directory references that accepted a connect
    pub external_servers_up: Vec<String>,
    /// `host:port` of external directory references that refused a connect
    pub external_servers_down: Vec<String>,
    /// Full paths of error (type `3`) entries encountered
    pub unique_invalid_references: Vec<String>,
    pub smallest_text_size: u64,
    pub largest_text_size: u64,
    pub smallest_binary_size: u64,
    pub largest_binary_size: u64,
    /// Body of the currently smallest text file; replaced together with its
    /// size
    pub smallest_text_contents: Option<String>,
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self {
            text_files: Vec::new(),
            binary_files: Vec::new(),
            bad_text_files: Vec::new(),
            bad_binary_files: Vec::new(),
            external_servers_up: Vec::new(),
            external_servers_down: Vec::new(),
            unique_invalid_references: Vec::new(),
            smallest_text_size: u64::MAX,
            largest_text_size: 0,
            smallest_binary_size: u64::MAX,
            largest_binary_size: 0,
            smallest_text_contents: None,
        }
    }
}

impl CrawlStats {
    /// Record a persisted text file. The extrema and the list are updated
    /// as a unit; ties keep the first-seen contents.
    pub(crate) fn record_text(&mut self, full_path: &str, size: u64, contents: &str) {
        if size < self.smallest_text_size {
            self.smallest_text_size = size;
            self.smallest_text_contents = Some(contents.to_string());
        }
        if size > self.largest_text_size {
            self.largest_text_size = size;
        }
        self.text_files.push(full_path.to_string());
    }

    /// Record a persisted binary file.
    pub(crate) fn record_binary(&mut self, full_path: &str, size: u64) {
        if size < self.smallest_binary_size {
            self.smallest_binary_size = size;
        }
        if size > self.largest_binary_size {
            self.largest_binary_size = size;
        }
        self.binary_files.push(full_path.to_string());
    }
}

/// The traversal-deduplication key for a resource
fn resource_key(host: &str, port: u16, selector: &str) -> String {
    format!("{host}:{port}{selector}")
}

/// Depth-first crawler over a Gopher menu graph
pub struct Indexer {
    config: Config,
    progress: Arc<ProgressBar>,
    writer: ResourceWriter,
    /// Directories already traversed, keyed by `host:port` + selector
    visited: HashSet<String>,
    /// External references already probed, same key shape
    probed: HashSet<String>,
    stats: CrawlStats,
}

impl Indexer {
    /// Create a new indexer
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let writer = ResourceWriter::new(config.clone());
        Self {
            config,
            progress,
            writer,
            visited: HashSet::new(),
            probed: HashSet::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Walk the origin server's menu tree starting from the root selector.
    ///
    /// Transport failures against individual resources are logged and
    /// recorded in the statistics; they never abort the walk.
    pub fn crawl(&mut self) {
        let host = self.config.host.clone();
        let port = self.config.port;
        self.fetch_directory(&host, port, "", "", 0);
    }

    /// Number of distinct directories traversed
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Get crawl statistics
    pub fn statistics(&self) -> CrawlStats {
        self.stats.clone()
    }

    fn fetch_directory(&mut self, host: &str, port: u16, selector: &str, full_path: &str, depth: u32) {
        if depth > self.config.max_depth {
            return;
        }
        // Cycle suppression: at most one visit per (host, port, selector).
        if !self.visited.insert(resource_key(host, port, selector)) {
            return;
        }

        self.progress.inc(1);
        self.progress.set_message(format!("{host}:{port}{selector}"));
        logger::info(format!("Fetching {host}:{port}{selector}"));

        let body = self
            .fetch_text(host, port, selector)
            .map_err(|err| logger::severe(err.to_string()))
            .ok();
        let body = match body {
            Some(body) if !body.is_empty() => body,
            _ => {
                logger::warning(format!(
                    "Empty or null response received for selector: {selector}"
                ));
                return;
            }
        };

        for entry in menu::parse_menu(&body) {
            let child_full_path = format!("{full_path}{}", entry.selector);
            match entry.item_type {
                ItemType::Info => {}
                ItemType::Directory => self.handle_directory(&entry, &child_full_path, depth),
                ItemType::Text => self.handle_text(&entry, &child_full_path),
                ItemType::Error => self.stats.unique_invalid_references.push(child_full_path),
                ItemType::Binary => self.handle_binary(&entry, &child_full_path),
                ItemType::Other(_) => {}
            }
        }
    }

    /// Recurse into origin directories; probe everything else exactly once
    /// per distinct reference.
    fn handle_directory(&mut self, entry: &MenuEntry, child_full_path: &str, depth: u32) {
        if entry.host == self.config.host && entry.port == self.config.port {
            self.fetch_directory(
                &entry.host,
                entry.port,
                &entry.selector,
                child_full_path,
                depth + 1,
            );
            return;
        }

        if !self
            .probed
            .insert(resource_key(&entry.host, entry.port, &entry.selector))
        {
            return;
        }

        let server = format!("{}:{}", entry.host, entry.port);
        self.progress.set_message(format!("probing {server}"));
        if Connection::probe(&entry.host, entry.port) {
            logger::info(format!("External server is up: {server}"));
            self.stats.external_servers_up.push(server);
        } else {
            logger::warning(format!("External server is down: {server}"));
            self.stats.external_servers_down.push(server);
        }
    }

    fn handle_text(&mut self, entry: &MenuEntry, child_full_path: &str) {
        logger::info(format!(
            "Fetching {}:{}{}",
            entry.host, entry.port, entry.selector
        ));

        let body = self
            .fetch_text(&entry.host, entry.port, &entry.selector)
            .map_err(|err| logger::severe(err.to_string()))
            .ok();
        let body = match body {
            Some(body) if !body.is_empty() => body,
            _ => {
                logger::warning(format!(
                    "Empty or null response received for selector: {}",
                    entry.selector
                ));
                self.stats.bad_text_files.push(child_full_path.to_string());
                return;
            }
        };

        let contents = strip_terminator(&body);
        let size = self.writer.write_text(contents, child_full_path);
        if size > 0 {
            self.stats.record_text(child_full_path, size, contents);
            logger::info(format!(
                "File downloaded and saved: {child_full_path} ({size} bytes)"
            ));
        }
    }

    fn handle_binary(&mut self, entry: &MenuEntry, child_full_path: &str) {
        logger::info(format!(
            "Fetching {}:{}{}",
            entry.host, entry.port, entry.selector
        ));

        let data = self
            .fetch_binary(&entry.host, entry.port, &entry.selector)
            .map_err(|err| logger::severe(err.to_string()))
            .ok();
        let Some(data) = data else {
            logger::warning(format!(
                "No response received for selector: {}",
                entry.selector
            ));
            self.stats
                .bad_binary_files
                .push(child_full_path.to_string());
            return;
        };

        let size = self.writer.write_binary(&data, child_full_path);
        if size > 0 {
            self.stats.record_binary(child_full_path, size);
            logger::info(format!(
                "File downloaded and saved: {child_full_path} ({size} bytes)"
            ));
        }
    }

    fn fetch_text(&self, host: &str, port: u16, selector: &str) -> crate::error::Result<String> {
        let mut conn = Connection::open(host, port)?;
        conn.send_request(selector)
    }

    fn fetch_binary(&self, host: &str, port: u16, selector: &str) -> crate::error::Result<Vec<u8>> {
        let mut conn = Connection::open(host, port)?;
        conn.read_binary(selector)
    }
}
