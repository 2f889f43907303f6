/*!
 * Reporting functionality for gopherdex
 *
 * Renders the statistics gathered by a finished crawl, either as console
 * tables (via the tabled library) or as JSON for machine consumption.
 */

use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::indexer::CrawlStats;
use crate::logger;
use crate::utils::format_file_size;

/// Statistics for a finished crawl, in printable form.
///
/// Extrema are `None` when the corresponding file list is empty, so the
/// internal sentinels never leak into output.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// Distinct directories traversed
    pub visited: usize,
    /// Wall-clock crawl time
    pub duration: Duration,
    pub text_files: Vec<String>,
    pub bad_text_files: Vec<String>,
    pub binary_files: Vec<String>,
    pub bad_binary_files: Vec<String>,
    pub external_servers_up: Vec<String>,
    pub external_servers_down: Vec<String>,
    pub unique_invalid_references: Vec<String>,
    pub smallest_text_size: Option<u64>,
    pub largest_text_size: Option<u64>,
    pub smallest_binary_size: Option<u64>,
    pub largest_binary_size: Option<u64>,
    pub smallest_text_contents: Option<String>,
}

impl CrawlReport {
    /// Assemble a report from the indexer's statistics
    pub fn new(visited: usize, duration: Duration, stats: CrawlStats) -> Self {
        let has_text = !stats.text_files.is_empty();
        let has_binary = !stats.binary_files.is_empty();

        Self {
            visited,
            duration,
            smallest_text_size: has_text.then_some(stats.smallest_text_size),
            largest_text_size: has_text.then_some(stats.largest_text_size),
            smallest_binary_size: has_binary.then_some(stats.smallest_binary_size),
            largest_binary_size: has_binary.then_some(stats.largest_binary_size),
            smallest_text_contents: stats.smallest_text_contents,
            text_files: stats.text_files,
            bad_text_files: stats.bad_text_files,
            binary_files: stats.binary_files,
            bad_binary_files: stats.bad_binary_files,
            external_servers_up: stats.external_servers_up,
            external_servers_down: stats.external_servers_down,
            unique_invalid_references: stats.unique_invalid_references,
        }
    }
}

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Console table output
    #[default]
    Console,
    /// Machine-readable JSON on stdout
    Json,
}

/// Report generator for crawl results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string based on crawl statistics
    pub fn generate_report(&self, report: &CrawlReport) -> String {
        match self.format {
            ReportFormat::Console => self.generate_console_report(report),
            ReportFormat::Json => match serde_json::to_string_pretty(report) {
                Ok(json) => json,
                Err(err) => {
                    logger::severe(format!("Failed to serialize report: {err}"));
                    String::new()
                }
            },
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &CrawlReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &CrawlReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let size_or_dash =
            |size: Option<u64>| size.map(format_file_size).unwrap_or_else(|| "-".to_string());

        let rows = vec![
            SummaryRow {
                key: "⏱️ Crawl Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📂 Directories Visited".to_string(),
                value: self.format_number(report.visited),
            },
            SummaryRow {
                key: "📄 Text Files Fetched".to_string(),
                value: self.format_number(report.text_files.len()),
            },
            SummaryRow {
                key: "📄 Bad Text Files".to_string(),
                value: self.format_number(report.bad_text_files.len()),
            },
            SummaryRow {
                key: "📦 Binary Files Fetched".to_string(),
                value: self.format_number(report.binary_files.len()),
            },
            SummaryRow {
                key: "📦 Bad Binary Files".to_string(),
                value: self.format_number(report.bad_binary_files.len()),
            },
            SummaryRow {
                key: "🌐 External Servers".to_string(),
                value: self.format_number(
                    report.external_servers_up.len() + report.external_servers_down.len(),
                ),
            },
            SummaryRow {
                key: "⚠️ Invalid References".to_string(),
                value: self.format_number(report.unique_invalid_references.len()),
            },
            SummaryRow {
                key: "Smallest Text File".to_string(),
                value: size_or_dash(report.smallest_text_size),
            },
            SummaryRow {
                key: "Largest Text File".to_string(),
                value: size_or_dash(report.largest_text_size),
            },
            SummaryRow {
                key: "Smallest Binary File".to_string(),
                value: size_or_dash(report.smallest_binary_size),
            },
            SummaryRow {
                key: "Largest Binary File".to_string(),
                value: size_or_dash(report.largest_binary_size),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Render one titled list section; empty lists produce no output
    fn list_section(&self, title: &str, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let mut section = format!("\n{} ({}):\n", title, items.len());
        for item in items {
            section.push_str("  ");
            section.push_str(item);
            section.push('\n');
        }
        section
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &CrawlReport) -> String {
        let mut out = String::from("✅  CRAWL COMPLETE\n");
        out.push_str(&self.create_summary_table(report));
        out.push('\n');

        out.push_str(&self.list_section("📄 Text files", &report.text_files));
        out.push_str(&self.list_section("📄 Bad text files", &report.bad_text_files));
        out.push_str(&self.list_section("📦 Binary files", &report.binary_files));
        out.push_str(&self.list_section("📦 Bad binary files", &report.bad_binary_files));
        out.push_str(&self.list_section("🌐 External servers up", &report.external_servers_up));
        out.push_str(&self.list_section("🌐 External servers down", &report.external_servers_down));
        out.push_str(&self.list_section(
            "⚠️ Invalid references",
            &report.unique_invalid_references,
        ));

        if let Some(contents) = &report.smallest_text_contents {
            out.push_str("\nSmallest text file contents:\n");
            out.push_str(contents);
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CrawlReport {
        let mut stats = CrawlStats::default();
        stats.record_text("/docs/a.txt", 12, "hello world\n");
        stats.record_text("/docs/b.txt", 40, &"b".repeat(40));
        stats.record_binary("/files/blob.bin", 4096);
        stats.bad_text_files.push("/docs/missing.txt".to_string());
        stats.external_servers_up.push("elsewhere:70".to_string());
        CrawlReport::new(3, Duration::from_millis(1500), stats)
    }

    #[test]
    fn test_report_hides_sentinels() {
        let report = CrawlReport::new(1, Duration::from_secs(1), CrawlStats::default());
        assert!(report.smallest_text_size.is_none());
        assert!(report.largest_binary_size.is_none());
    }

    #[test]
    fn test_console_report_contents() {
        let reporter = Reporter::new(ReportFormat::Console);
        let out = reporter.generate_report(&sample_report());
        assert!(out.contains("CRAWL COMPLETE"));
        assert!(out.contains("/docs/a.txt"));
        assert!(out.contains("/docs/missing.txt"));
        assert!(out.contains("elsewhere:70"));
        assert!(out.contains("hello world"));
        // Empty sections are omitted entirely
        assert!(!out.contains("Invalid references ("));
    }

    #[test]
    fn test_json_report_parses() {
        let reporter = Reporter::new(ReportFormat::Json);
        let out = reporter.generate_report(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["visited"], 3);
        assert_eq!(value["smallest_text_size"], 12);
        assert_eq!(value["text_files"][0], "/docs/a.txt");
        assert!(value["smallest_binary_size"].as_u64().is_some());
    }

    #[test]
    fn test_format_number() {
        let reporter = Reporter::new(ReportFormat::Console);
        assert_eq!(reporter.format_number(999), "999");
        assert_eq!(reporter.format_number(1_500), "1.5K");
        assert_eq!(reporter.format_number(2_000_000), "2.0M");
    }
}
