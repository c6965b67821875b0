//! Single-level directory scan and sidecar pairing by base name.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Role a file plays next to a video, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarKind {
    /// `.strm`: plugin URL carrying a platform id in its query string
    Pointer,
    /// `.url`: literal URL, takes precedence over a pointer
    Override,
    /// `.nfo`: title/plot/thumb/tags document
    Metadata,
}

impl SidecarKind {
    /// Classify a lower-cased extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "strm" => Some(SidecarKind::Pointer),
            "url" => Some(SidecarKind::Override),
            "nfo" => Some(SidecarKind::Metadata),
            _ => None,
        }
    }
}

/// Split a file name into (base name, lower-cased extension).
/// The extension starts at the last dot, so `.nfo` has an empty base name.
pub fn split_name(name: &str) -> (&str, String) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], name[idx + 1..].to_lowercase()),
        None => (name, String::new()),
    }
}

/// Sidecar files found for one base name in one directory
#[derive(Debug, Default, Clone)]
pub struct PairCandidate {
    pub pointer: Option<PathBuf>,
    pub override_url: Option<PathBuf>,
    pub metadata: Option<PathBuf>,
    mtime: Option<SystemTime>,
}

impl PairCandidate {
    /// Record a sidecar file. `mtime` is only consulted for pointer and
    /// override files, and is passed lazily so metadata files are never stat'ed.
    pub fn record<F>(&mut self, kind: SidecarKind, path: PathBuf, mtime: F)
    where
        F: FnOnce(&Path) -> Option<SystemTime>,
    {
        match kind {
            SidecarKind::Pointer => {
                // An override's timestamp is authoritative, whenever it was seen
                if self.override_url.is_none() {
                    self.mtime = mtime(&path);
                }
                self.pointer = Some(path);
            }
            SidecarKind::Override => {
                self.mtime = mtime(&path);
                self.override_url = Some(path);
            }
            SidecarKind::Metadata => {
                self.metadata = Some(path);
            }
        }
    }

    /// Metadata plus at least one of pointer/override
    pub fn is_qualifying(&self) -> bool {
        self.metadata.is_some() && (self.pointer.is_some() || self.override_url.is_some())
    }

    /// Resolved timestamp (epoch when the file could not be stat'ed)
    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.mtime.unwrap_or(SystemTime::UNIX_EPOCH))
    }
}

/// Result of scanning one directory level
#[derive(Debug, Default)]
pub struct DirScan {
    /// Subdirectory names in the order the filesystem returned them
    pub dirs: Vec<String>,
    /// Sidecar candidates keyed by base name
    pub candidates: HashMap<String, PairCandidate>,
}

impl DirScan {
    /// Iterate over qualifying pairs only
    pub fn qualifying(&self) -> impl Iterator<Item = (&String, &PairCandidate)> {
        self.candidates.iter().filter(|(_, c)| c.is_qualifying())
    }
}

/// Scan the immediate children of `dir`, classifying files by extension.
/// Does not descend into subdirectories.
pub fn scan_directory(dir: &Path) -> std::io::Result<DirScan> {
    let mut scan = DirScan::default();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type()?.is_dir() {
            scan.dirs.push(name);
            continue;
        }

        let (base, ext) = split_name(&name);
        let Some(kind) = SidecarKind::from_extension(&ext) else {
            continue;
        };

        scan.candidates
            .entry(base.to_string())
            .or_default()
            .record(kind, entry.path(), modified_time);
    }

    Ok(scan)
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
