pub mod analysis;
pub mod model;
pub mod parsers;
pub mod syntax;
pub mod utils;

use log::{debug, info};
use model::Analysis;
use std::io;
use std::path::Path;

pub use model::to_usage_report;

pub fn analyze_source_root(root_path: &Path, num_threads: usize) -> io::Result<Vec<Analysis>> {
    info!(
        "Analyzing source root {:?} with {} threads",
        root_path, num_threads
    );
    analysis::walker::analyze_source_root(root_path, num_threads)
}

pub fn analyze_codebase(
    root_path: &Path,
    output_path: &Path,
    num_threads: usize,
) -> io::Result<()> {
    info!("Starting codebase analysis");
    debug!("Root path: {:?}, Output path: {:?}", root_path, output_path);

    let analyses = analyze_source_root(root_path, num_threads)?;

    info!("Aggregating usage for {} entities", analyses.len());
    let usage = model::to_usage_report(&analyses);

    info!("Exporting report to JSON at {:?}", output_path);
    utils::io::export_report_to_json(&analyses, &usage, output_path)?;

    info!(
        "Analysis complete: {} entities and {} usage entries",
        analyses.len(),
        usage.len()
    );

    Ok(())
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
