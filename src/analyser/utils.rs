//! I/O collaborators around the scan core: opening log sources and reading
//! batch target lists.
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Opens a log source for line-by-line reading.
///
/// Missing files and permission problems surface here as an `io::Error`,
/// keeping "source unavailable" distinguishable from "scanned but empty."
pub fn open_log(path: &Path) -> io::Result<BufReader<File>> {
    let file = File::open(path)?;
    log::info!("Reading from {}", path.display());
    Ok(BufReader::new(file))
}

/// Reads a batch target list: comma-separated records, one per line, with
/// the address to investigate in the second field.
///
/// Records without an address-shaped second field (header lines, short
/// rows) are skipped, so exported endpoint lists can be fed in unedited.
pub fn read_targets(path: &Path) -> io::Result<Vec<String>> {
    log::info!("Reading target list from {}", path.display());
    let file = File::open(path)?;
    Ok(read_targets_from(file))
}

pub fn read_targets_from<R: Read>(input: R) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut targets = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Skipping unreadable target record: {err}");
                continue;
            }
        };

        match record.get(1).map(str::trim) {
            Some(field) if is_address_shaped(field) => targets.push(field.to_string()),
            Some(field) => log::debug!("Skipping non-address field {field:?} in target list"),
            None => log::debug!("Skipping short record in target list"),
        }
    }

    targets
}

// Shape check only; full address validation is not this tool's job.
fn is_address_shaped(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}
