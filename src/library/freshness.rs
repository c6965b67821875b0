use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::SystemTime;

use super::sidecar::scan_directory;

/// Representative "last updated" time of a subdirectory.
///
/// The newest qualifying pair directly inside `dir` wins. Grandchildren are
/// never inspected, so fresh content two levels down does not bubble up.
/// Without a qualifying pair (or when `dir` cannot be read) the directory's
/// own modification time is used.
pub fn directory_freshness(dir: &Path) -> DateTime<Utc> {
    let newest = match scan_directory(dir) {
        Ok(scan) => scan.qualifying().map(|(_, pair)| pair.timestamp()).max(),
        Err(e) => {
            tracing::debug!("Cannot scan {} for freshness: {}", dir.display(), e);
            None
        }
    };

    newest.unwrap_or_else(|| {
        let mtime = std::fs::metadata(dir)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        DateTime::<Utc>::from(mtime)
    })
}
