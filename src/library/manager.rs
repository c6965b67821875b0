use std::path::PathBuf;

use super::entry::{Entry, Listing, VideoRecord};
use super::freshness::directory_freshness;
use super::guard::{clean_relative, is_within_root, parent_of};
use super::metadata::read_metadata;
use super::pointer::{read_override, read_pointer};
use super::sidecar::{scan_directory, PairCandidate};
use super::{sort_by_freshness, sort_by_title};
use crate::error::{Error, Result};

/// Read-only view over the video tree.
/// Every listing is derived from the filesystem at call time; nothing is cached.
#[derive(Debug, Clone)]
pub struct Library {
    /// Library root directory
    root: PathBuf,
}

impl Library {
    /// Create a new Library instance. The root is assumed to be an existing directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Normalize a request path and map it under the root.
    /// Returns the clean relative path and the absolute location,
    /// or `Error::Forbidden` when the result would escape the root.
    pub fn resolve(&self, rel: &str) -> Result<(String, PathBuf)> {
        let clean = clean_relative(rel);
        let target = self.root.join(&clean);

        if !is_within_root(&self.root, &target) {
            tracing::warn!("Rejected path outside library root: {:?}", rel);
            return Err(Error::Forbidden(format!("path outside library root: {}", rel)));
        }

        Ok((clean, target))
    }

    /// Scan one directory and build its listing
    pub fn build_listing(&self, rel: &str) -> Result<Listing> {
        let (path, dir) = self.resolve(rel)?;
        let scan = scan_directory(&dir)?;

        // Visit pairs in name order so exact freshness ties are reproducible
        let mut pairs: Vec<(&String, &PairCandidate)> = scan.qualifying().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let mut videos = Vec::with_capacity(pairs.len());
        let mut entries = Vec::with_capacity(pairs.len() + scan.dirs.len());

        for (base, pair) in pairs {
            match resolve_pair(base, pair) {
                Ok(video) => {
                    entries.push(Entry::video(video.clone(), pair.timestamp()));
                    videos.push(video);
                }
                Err(e) => {
                    tracing::debug!("Skipping {:?} in {}: {}", base, dir.display(), e);
                }
            }
        }

        let mut dirs = scan.dirs;
        dirs.sort();

        for name in &dirs {
            let freshness = directory_freshness(&dir.join(name));
            entries.push(Entry::dir(name, join_relative(&path, name), freshness));
        }

        sort_by_title(&mut videos);
        sort_by_freshness(&mut entries);

        tracing::debug!(
            "Listed /{}: {} directories, {} videos",
            path,
            dirs.len(),
            videos.len()
        );

        Ok(Listing {
            parent_path: parent_of(&path),
            path,
            dirs,
            videos,
            entries,
        })
    }

    /// `build_listing` on the blocking pool (directory scans are synchronous I/O)
    pub async fn listing(&self, rel: &str) -> Result<Listing> {
        let library = self.clone();
        let rel = rel.to_string();

        tokio::task::spawn_blocking(move || library.build_listing(&rel))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }
}

/// Read the sidecar files of one qualifying pair.
/// An override file takes precedence over the pointer file.
fn resolve_pair(base: &str, pair: &PairCandidate) -> Result<VideoRecord> {
    let metadata_path = pair
        .metadata
        .as_deref()
        .ok_or_else(|| Error::NotFound(format!("no metadata file for {}", base)))?;

    if let Some(override_path) = pair.override_url.as_deref() {
        let url = read_override(override_path)?;
        let meta = read_metadata(metadata_path)?;
        return Ok(VideoRecord::from_override(base, url, meta));
    }

    let pointer_path = pair
        .pointer
        .as_deref()
        .ok_or_else(|| Error::NotFound(format!("no pointer file for {}", base)))?;
    let target = read_pointer(pointer_path)?;
    let meta = read_metadata(metadata_path)?;

    Ok(VideoRecord::from_pointer(base, target, meta))
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
