//! Flat-file catalog format.
//!
//! One JSON object per line, each followed by a literal `,`. The result is
//! not a JSON document; [`read_catalog`] undoes the line suffix.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::errors::MarketDataError;
use crate::models::CodeEntry;

const LINE_SUFFIX: &str = ",\n";

/// Catalog file name for a segment, e.g. `sz_a_stock.txt`.
pub fn catalog_file_name(segment: &str) -> String {
    format!("{}_stock.txt", segment)
}

/// Write `entries` to `path`, replacing any existing file.
///
/// Returns the number of entries written. An entry that fails to serialize
/// is logged and left out.
pub fn write_catalog(path: &Path, entries: &[CodeEntry]) -> Result<usize, MarketDataError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut written = 0;

    for entry in entries {
        let line = match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize catalog entry {}: {}", entry.symbol, e);
                continue;
            }
        };
        writer.write_all(line.as_bytes())?;
        writer.write_all(LINE_SUFFIX.as_bytes())?;
        written += 1;
    }

    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(written)
}

/// Read a catalog written by [`write_catalog`]. Blank lines are ignored.
pub fn read_catalog(path: &Path) -> Result<Vec<CodeEntry>, MarketDataError> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let json = line.strip_suffix(',').unwrap_or(line);
        entries.push(serde_json::from_str(json)?);
    }

    Ok(entries)
}
