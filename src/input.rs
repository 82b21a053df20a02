use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::entry::Entry;
use crate::error::InputError;

/// Read a `<id><sep><description>` list into entries.
pub fn load(path: &Path, separator: &str, base_url: &str) -> Result<Vec<Entry>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _ => InputError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let entries = parse_lines(&text, separator, base_url);
    info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Blank lines and lines without `separator` produce no entry.
pub fn parse_lines(text: &str, separator: &str, base_url: &str) -> Vec<Entry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            debug!("Processing file line: {}", line);
            match line.split_once(separator) {
                Some((id, description)) => Some(Entry::new(id.trim(), description.trim(), base_url)),
                None => {
                    debug!("Skipping line without {:?}: {}", separator, line);
                    None
                }
            }
        })
        .collect()
}
