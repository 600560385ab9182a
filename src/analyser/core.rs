//! Drives one target's pass over the log: extract, classify, aggregate.
use super::aggregate::Aggregator;
use super::classify::classify;
use super::extract::Extractor;
use super::utils;
use std::io::{self, BufRead};
use std::path::Path;

/// Folds a line stream into an [Aggregator] for one target address.
///
/// Lines that don't carry the flow vocabulary, and flows that don't touch
/// the target, are skipped silently. A read error aborts the scan and is
/// the caller's problem; an aggregator with nothing in it is not an error.
pub fn scan<R: BufRead>(reader: R, target: &str, extractor: &Extractor) -> io::Result<Aggregator> {
    let mut aggregator = Aggregator::new();
    let mut scanned: usize = 0;

    for line in reader.lines() {
        let line = line?;
        scanned += 1;

        if let Some(attrs) = extractor.extract(&line) {
            if let Some(flow) = classify(&attrs, target) {
                aggregator.record(flow);
            }
        }
    }

    log::info!(
        "Scanned {scanned} lines, {} unique flows involve {target}",
        aggregator.flow_count()
    );
    Ok(aggregator)
}

/// Opens a log file and scans it for one target.
pub fn scan_log(path: &Path, target: &str, extractor: &Extractor) -> io::Result<Aggregator> {
    log::info!("Scanning {} for flows involving {target}", path.display());
    let reader = utils::open_log(path)?;
    scan(reader, target, extractor)
}
