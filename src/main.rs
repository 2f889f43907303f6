/*!
 * Command-line interface for gopherdex
 */

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};

use gopherdex::config::{Args, Config};
use gopherdex::error::Result;
use gopherdex::indexer::Indexer;
use gopherdex::logger;
use gopherdex::report::{CrawlReport, Reporter};

/// Generate shell completions
fn print_completions(generator: Shell, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Handle completions if requested
    if let Some(generator) = args.generate {
        let mut cmd = Args::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);
        return Ok(());
    }

    let config = Config::from_args(args);
    config.validate()?;

    // Spinner drawn on stderr; stdout stays clean for the log and report
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} dirs  ⏱️ {elapsed_precise}")
            .map_err(|e| gopherdex::error!(Unexpected, "failed to create progress style: {e}"))?,
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📡 Crawling");

    logger::info(format!(
        "Indexing gopher://{}:{}/",
        config.host, config.port
    ));

    let mut indexer = Indexer::new(config.clone(), Arc::new(progress.clone()));

    let start_time = Instant::now();
    indexer.crawl();
    let duration = start_time.elapsed();

    progress.finish_and_clear();
    logger::info("Finished indexing");

    let report = CrawlReport::new(indexer.visited_count(), duration, indexer.statistics());
    let reporter = Reporter::new(config.report_format);
    reporter.print_report(&report);

    Ok(())
}
