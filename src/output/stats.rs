//! Console summary output
//!
//! Human-readable counts and timings; not part of the persisted report.

use crate::output::report::Summary;

/// Formats the summary block printed after a crawl
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Crawl Summary:\n\
         Total URLs processed: {}\n\
         Successful fetches: {}\n\
         Failed fetches: {}\n\
         Total time: {:.2} seconds\n\
         Average time per URL: {:.4} seconds",
        summary.total_urls,
        summary.successful_fetches,
        summary.failed_fetches,
        summary.total_time,
        summary.average_time_per_url
    )
}

/// Prints the summary to stdout
pub fn print_summary(summary: &Summary) {
    println!();
    println!("{}", format_summary(summary));
}
